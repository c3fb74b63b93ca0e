use crate::config::AppConfig;
use crate::error::Result;
use crate::llm::ProgressReporter;
use crate::llm::prompt::PromptBuilder;
use crate::ui;

use super::execute::{ExecutorResult, execute};
use super::options::RunOptions;

/// Runs one request and prints the result
///
/// The spinner is only shown for text output; JSON and quiet output stay
/// machine-readable.
pub async fn run(options: &RunOptions<'_>, config: &AppConfig) -> Result<()> {
    let colored = options.effective_colored(config);
    let prompts = PromptBuilder::from_prompts_dir(config.prompts_dir.as_deref());

    let spinner = options
        .format
        .is_interactive()
        .then(|| ui::Spinner::new(&rust_i18n::t!("run.waiting")));
    let progress = spinner.as_ref().map(|s| s as &dyn ProgressReporter);

    let result = execute(config, &prompts, options, progress).await;
    if let Some(spinner) = &spinner {
        spinner.finish_and_clear();
    }
    let result = result?;

    if options.verbose {
        print_verbose_header(&result, options, colored);
    }

    if options.copy {
        match ui::copy_to_clipboard(&result.output) {
            Ok(tool) => tracing::debug!("Output copied with {}", tool),
            Err(e) => ui::warning(
                &rust_i18n::t!("clipboard.copy_failed", error = e.localized_message()),
                colored,
            ),
        }
    }

    println!("{}", result.output);
    Ok(())
}

/// `Provider:` / `Model:` / `Mode:` lines (stderr for JSON so stdout stays parseable)
fn print_verbose_header(result: &ExecutorResult, options: &RunOptions<'_>, colored: bool) {
    let lines = [
        ui::labeled("Provider", &result.provider_name, colored),
        ui::labeled("Model", &result.model, colored),
        ui::labeled("Mode", result.mode.as_str(), colored),
    ];
    for line in lines {
        if options.format.is_json() {
            eprintln!("{}", line);
        } else {
            println!("{}", line);
        }
    }
}
