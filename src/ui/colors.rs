use colored::Colorize;

/// 显示错误消息（红色 ✗，输出到 stderr）
pub fn error(msg: &str, colored: bool) {
    if colored {
        eprintln!("{} {}", "✗".red().bold(), msg.red());
    } else {
        eprintln!("✗ {}", msg);
    }
}

/// 显示警告消息（黄色 ⚠，输出到 stderr，保持 stdout 可管道）
pub fn warning(msg: &str, colored: bool) {
    if colored {
        eprintln!("{} {}", "⚠".yellow().bold(), msg.yellow());
    } else {
        eprintln!("⚠ {}", msg);
    }
}

/// 格式化信息消息（蓝色 ℹ）
pub fn info(msg: &str, colored: bool) -> String {
    if colored {
        format!("{} {}", "ℹ".blue().bold(), msg.blue())
    } else {
        format!("ℹ {}", msg)
    }
}

/// 格式化 `Label: value` 行（verbose 头部）
pub fn labeled(label: &str, value: &str, colored: bool) -> String {
    if colored {
        format!("{} {}", format!("{}:", label).bright_black().bold(), value)
    } else {
        format!("{}: {}", label, value)
    }
}

/// 格式化检查状态（OK 绿色 / FAIL 红色）
pub fn status(ok: bool, colored: bool) -> String {
    let text = if ok { "OK" } else { "FAIL" };
    match (colored, ok) {
        (false, _) => text.to_string(),
        (true, true) => text.green().bold().to_string(),
        (true, false) => text.red().bold().to_string(),
    }
}
