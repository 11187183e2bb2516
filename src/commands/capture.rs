use anyhow::{Context, Result};
use scraper::ElementRef;
use std::fs::OpenOptions;
use std::path::PathBuf;
use tracing::{debug, info};

use crate::commands::synth::print_simple;
use crate::commands::utils::{self, TuningArgs};
use selprobe::{
    CapturedRecord, ClipboardError, ClipboardWriter, Collaborators, JsonLinesSink, Message,
    MessageSink, OutputFormat, Presenter, SelectionController, SelectionEvent, SelectionOutcome, Synthesis,
    Synthesizer, SystemClipboard, TracingSink,
};

pub struct CaptureOptions {
    pub description: Option<String>,
    pub copy: bool,
    pub history: bool,
    pub log_file: Option<PathBuf>,
    pub store: Option<PathBuf>,
}

/// Terminal feedback on stderr, leaving stdout to the captured record
struct ConsolePresenter {
    verbose: bool,
}

impl Presenter for ConsolePresenter {
    fn selection_started(&mut self) {
        debug!("Selection started");
    }

    fn highlight(&mut self, element: ElementRef<'_>, synthesis: &Synthesis) {
        if self.verbose {
            eprintln!(
                "Selected <{}>: {} candidate selectors",
                element.value().name(),
                synthesis.candidates.len()
            );
        }
    }

    fn clear_highlight(&mut self) {}

    fn teardown(&mut self) {
        debug!("Selection finished");
    }

    fn status(&mut self, message: &str) {
        eprintln!("{}", message);
    }
}

/// System clipboard, or the reason it could not be opened
enum CliClipboard {
    System(SystemClipboard),
    Unavailable(ClipboardError),
}

impl CliClipboard {
    fn open() -> Self {
        match SystemClipboard::new() {
            Ok(clipboard) => CliClipboard::System(clipboard),
            Err(e) => CliClipboard::Unavailable(e),
        }
    }
}

impl ClipboardWriter for CliClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        match self {
            CliClipboard::System(clipboard) => clipboard.set_text(text),
            CliClipboard::Unavailable(e) => Err(e.clone()),
        }
    }
}

pub async fn handle_capture(
    source: String,
    selector: String,
    index: usize,
    options: CaptureOptions,
    format: OutputFormat,
    tuning: TuningArgs,
) -> Result<()> {
    info!("Capturing {}[{}] in {}", selector, index, source);

    if options
        .description
        .as_deref()
        .is_some_and(|d| d.trim().is_empty())
    {
        anyhow::bail!("Description must not be blank");
    }
    let config = tuning.resolve()?;
    let (document, target) = utils::load_target(&source, &selector, index).await?;

    let mut presenter = ConsolePresenter {
        verbose: matches!(format, OutputFormat::Simple),
    };
    let mut messages: Box<dyn MessageSink> = match &options.log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            Box::new(JsonLinesSink::new(file))
        }
        None => Box::new(TracingSink),
    };
    let mut history = if options.history {
        Some(utils::open_history(options.store)?)
    } else {
        None
    };
    let mut clipboard = options.copy.then(CliClipboard::open);

    let mut collaborators = Collaborators {
        presenter: &mut presenter,
        messages: messages.as_mut(),
        history: history.as_mut(),
        clipboard: clipboard
            .as_mut()
            .map(|c| c as &mut dyn ClipboardWriter),
    };

    let mut controller = SelectionController::new(Synthesizer::new(config));
    controller.handle(&document, SelectionEvent::Start, &mut collaborators);
    let hovered = controller.handle(
        &document,
        SelectionEvent::Hover(Some(target)),
        &mut collaborators,
    );
    let outcome = match options.description {
        Some(description) => controller.handle_message(
            &document,
            &Message::CaptureData { description },
            &mut collaborators,
        ),
        None => controller.handle(&document, SelectionEvent::Confirm, &mut collaborators),
    };

    let record = match outcome {
        SelectionOutcome::Captured(record) => record,
        other => anyhow::bail!("Selection did not complete: {:?}", other),
    };

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&record)?),
        OutputFormat::Simple => {
            print_record(&record);
            if let SelectionOutcome::Hovered(synthesis) = hovered {
                print_simple(&synthesis);
            }
        }
    }
    Ok(())
}

fn print_record(record: &CapturedRecord) {
    if let Some(description) = &record.description {
        println!("{}", description);
    }
    println!("<{}> {}", record.tag_name, record.text);
    for (name, value) in &record.attributes {
        println!("  {}=\"{}\"", name, value);
    }
    match (&record.title, &record.url) {
        (Some(title), Some(url)) => println!("from \"{}\" ({})", title, url),
        (None, Some(url)) => println!("from {}", url),
        (Some(title), None) => println!("from \"{}\"", title),
        (None, None) => {}
    }
    println!("captured {}", record.captured_at.to_rfc3339());
}
