use config::Config;
use dictionary::{
    validate_chapter, ChapterCheck, Dictionary, DictionaryDescriptor, DictionaryRegistry,
    Resolution,
};
use practice::practice_chapter;
use selection::resolve_selected;
use storage::Storage;
use tracing_subscriber::EnvFilter;
use utilities::{input, parse_chapter_number, str_to_bool};

mod config;
mod practice;
mod selection;
mod storage;
mod utilities;

struct App {
    storage: Storage,
    dict: Dictionary,
    registry: DictionaryRegistry,
    default_dictionary: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = Config::new();
    tracing::debug!(?config, "loaded configuration");
    let app = App {
        storage: Storage::initialize(&config.database_url).await?,
        dict: Dictionary::new(Some(&config.words_base_url), config.chapter_length)?,
        registry: config.registry()?,
        default_dictionary: config.default_dictionary.clone(),
    };

    // start downloading while the user reads the prompt
    let (descriptor, _) = app.current_selection().await?;
    app.dict.prefetch(&descriptor);

    loop {
        let line = input(">> ")?;
        let line = line.trim();
        let mut command_parts = line.split_ascii_whitespace();
        if let Some(command) = command_parts.next() {
            match command {
                "exit" | "leave" | "quit" | "e" | "q" | "l" => {
                    break;
                }
                "help" | "h" => {
                    print_help();
                }
                "dicts" | "list" => {
                    app.list_dictionaries().await?;
                }
                "use" => match command_parts.next() {
                    Some(id) => app.use_dictionary(id).await?,
                    None => println!("Usage: use <dictionary id>"),
                },
                "chapter" => match command_parts.next().and_then(parse_chapter_number) {
                    Some(chapter) => app.go_to_chapter(chapter).await?,
                    None => println!("Usage: chapter <number, starting from 1>"),
                },
                "next" | "n" => {
                    let (_, chapter) = app.current_selection().await?;
                    app.go_to_chapter(chapter + 1).await?;
                }
                "prev" | "p" => {
                    let (_, chapter) = app.current_selection().await?;
                    match chapter.checked_sub(1) {
                        Some(chapter) => app.go_to_chapter(chapter).await?,
                        None => println!("Already at the first chapter."),
                    }
                }
                "show" | "s" => {
                    app.show_chapter().await?;
                }
                "practice" => {
                    let shuffle = matches!(command_parts.next(), Some("shuffle" | "random"));
                    app.practice(shuffle).await?;
                }
                "records" => {
                    app.show_records().await?;
                }
                "refresh" => {
                    let (descriptor, _) = app.current_selection().await?;
                    if app.dict.refresh(&descriptor) {
                        println!("The word list of {} will be downloaded again.", descriptor.name);
                    } else {
                        println!("The word list of {} was not downloaded yet.", descriptor.name);
                    }
                }
                _ => {
                    println!("Unknown command {command}. Type 'help' for the list of commands.");
                }
            }
        }
    }
    Ok(())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("typing_chapters=info,dictionary=info")),
        )
        .init();
}

impl App {
    /// The selected dictionary and chapter, falling back to the default
    /// dictionary when nothing (or something unknown) is stored.
    async fn current_selection(&self) -> anyhow::Result<(DictionaryDescriptor, usize)> {
        if let Some(selection) = self.storage.selection().await? {
            match self.registry.descriptor(&selection.dict_id) {
                Ok(descriptor) => return Ok((descriptor, selection.chapter())),
                Err(error) => {
                    tracing::warn!(%error, "stored dictionary is not available, using the default one");
                }
            }
        }
        let descriptor = self.registry.descriptor(&self.default_dictionary)?;
        self.storage.select_dictionary(&descriptor.id).await?;
        Ok((descriptor, 0))
    }

    async fn list_dictionaries(&self) -> anyhow::Result<()> {
        let (current, _) = self.current_selection().await?;
        for (entry, descriptor) in self.registry.entries().iter().zip(self.registry.descriptors()) {
            let marker = if descriptor.id == current.id { "*" } else { " " };
            println!(
                "{marker} {:<10} {:<10} {:>5} words, {:>4} chapters",
                descriptor.id, descriptor.name, entry.length, descriptor.chapter_count
            );
            if let Some(description) = &entry.description {
                println!("             {description}");
            }
        }
        Ok(())
    }

    async fn use_dictionary(&self, id: &str) -> anyhow::Result<()> {
        match self.registry.descriptor(id) {
            Ok(descriptor) => {
                self.storage.select_dictionary(&descriptor.id).await?;
                self.dict.prefetch(&descriptor);
                println!(
                    "Now practicing {} ({} chapters).",
                    descriptor.name, descriptor.chapter_count
                );
            }
            Err(error) => println!("{error}. Type 'dicts' to see the available dictionaries."),
        }
        Ok(())
    }

    async fn go_to_chapter(&self, chapter: usize) -> anyhow::Result<()> {
        let (descriptor, _) = self.current_selection().await?;
        match validate_chapter(&descriptor, chapter) {
            ChapterCheck::InRange(chapter) => {
                self.storage.set_chapter(chapter).await?;
                println!("Chapter {} of {}.", chapter + 1, descriptor.chapter_count);
            }
            ChapterCheck::OutOfRange { requested, .. } => {
                println!(
                    "{} has no chapter {}, it has {} chapters.",
                    descriptor.name,
                    requested + 1,
                    descriptor.chapter_count
                );
            }
        }
        Ok(())
    }

    /// Resolves the selected chapter, moving the selection back to the first
    /// chapter if it no longer exists.
    async fn resolve_current(&self) -> anyhow::Result<(DictionaryDescriptor, usize, Resolution)> {
        let (descriptor, chapter) = self.current_selection().await?;
        let resolution = resolve_selected(&self.storage, &self.dict, &descriptor, chapter).await?;
        if let Some(reset) = resolution.chapter_reset {
            println!(
                "{} has no chapter {}, moved back to chapter {}.",
                descriptor.name,
                chapter + 1,
                reset + 1
            );
        }
        Ok((descriptor, chapter, resolution))
    }

    async fn show_chapter(&self) -> anyhow::Result<()> {
        let (descriptor, chapter, resolution) = self.resolve_current().await?;
        match &resolution.words {
            None => match &resolution.error {
                Some(error) => println!("Could not load {}: {error}", descriptor.name),
                None => println!("Loading {}...", descriptor.name),
            },
            Some(words) => {
                println!(
                    "{} - chapter {} of {}:",
                    descriptor.name,
                    chapter + 1,
                    descriptor.chapter_count
                );
                for word in words {
                    println!(
                        "  {:>2}. {:<16} {}",
                        word.index + 1,
                        word.word.name,
                        word.word.translations().collect::<Vec<&str>>().join("; ")
                    );
                }
                if words.is_empty() {
                    println!("  (no words)");
                }
                if let Some(status) = fetch_status(&descriptor, &resolution) {
                    println!("{status}");
                }
            }
        }
        Ok(())
    }

    async fn practice(&self, shuffle: bool) -> anyhow::Result<()> {
        let (descriptor, chapter, resolution) = self.resolve_current().await?;
        let words = match resolution.words {
            Some(words) if !words.is_empty() => words,
            Some(_) => {
                println!("There are no words to practice in this chapter.");
                return Ok(());
            }
            None => {
                match resolution.error {
                    Some(error) => println!("Could not load {}: {error}", descriptor.name),
                    None => println!("{} is still loading, try again in a moment.", descriptor.name),
                }
                return Ok(());
            }
        };
        let result = practice_chapter(&self.storage, &descriptor.id, chapter, &words, shuffle).await?;
        println!(
            "Chapter {} done: {} correct, {} wrong, {} skipped.",
            chapter + 1,
            result.correct,
            result.wrong,
            result.skipped
        );
        if chapter + 1 < descriptor.chapter_count {
            let answer = input("Move on to the next chapter? (Y/n): ")?;
            if str_to_bool(answer).unwrap_or(true) {
                self.go_to_chapter(chapter + 1).await?;
            }
        }
        Ok(())
    }

    async fn show_records(&self) -> anyhow::Result<()> {
        let (descriptor, _) = self.current_selection().await?;
        let records = self.storage.chapter_records(&descriptor.id, 10).await?;
        if records.is_empty() {
            println!("No chapters of {} practiced yet.", descriptor.name);
        }
        for record in records {
            println!(
                "{}  chapter {:>3}  {:>3} correct  {:>3} wrong  {:>3} skipped  {:>5.1}%",
                record.finished_at.format("%Y-%m-%d %H:%M"),
                record.chapter + 1,
                record.correct,
                record.wrong,
                record.skipped,
                record.accuracy() * 100.0
            );
        }
        Ok(())
    }
}

/// Note printed under words that did not come from the fetched word list.
fn fetch_status(descriptor: &DictionaryDescriptor, resolution: &Resolution) -> Option<String> {
    if let Some(error) = &resolution.error {
        Some(format!("(could not load the rest of {}: {error})", descriptor.name))
    } else if resolution.is_loading {
        Some(format!("(the rest of {} is still loading)", descriptor.name))
    } else {
        None
    }
}

fn print_help() {
    println!("dicts               list the available dictionaries");
    println!("use <id>            switch dictionary, starting from its first chapter");
    println!("chapter <n>         go to chapter n");
    println!("next, prev          move between chapters");
    println!("show                show the words of the current chapter");
    println!("practice [shuffle]  type the words of the current chapter");
    println!("records             recent results for the current dictionary");
    println!("refresh             download the current word list again");
    println!("quit                leave");
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use dictionary::DictionaryError;

    use super::*;

    fn cet4() -> DictionaryDescriptor {
        DictionaryDescriptor::new("cet4", "CET-4", "/dicts/CET4_T.json", 131)
    }

    #[test]
    fn fetch_error_is_reported_next_to_fallback_words() {
        let resolution = Resolution {
            words: Some(vec![]),
            is_loading: false,
            error: Some(Arc::new(DictionaryError::UnknownDictionary("cet4".to_owned()))),
            chapter_reset: None,
        };
        let status = fetch_status(&cet4(), &resolution).unwrap();
        assert!(status.contains("could not load the rest of CET-4"));
        assert!(status.contains("unknown dictionary"));
    }

    #[test]
    fn loading_and_loaded_states() {
        let loading = Resolution {
            is_loading: true,
            ..Resolution::default()
        };
        assert_eq!(
            fetch_status(&cet4(), &loading).as_deref(),
            Some("(the rest of CET-4 is still loading)")
        );
        assert_eq!(fetch_status(&cet4(), &Resolution::default()), None);
    }
}
