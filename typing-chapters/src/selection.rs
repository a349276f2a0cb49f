use dictionary::{Dictionary, DictionaryDescriptor, Resolution, WordListFetcher};

use crate::storage::Storage;

/// Resolves `chapter` of `descriptor` and stores the chapter reset the
/// resolution asks for, so the next call lands on a valid chapter.
pub async fn resolve_selected<F: WordListFetcher>(
    storage: &Storage,
    dict: &Dictionary<F>,
    descriptor: &DictionaryDescriptor,
    chapter: usize,
) -> sqlx::Result<Resolution> {
    let resolution = dict.chapter_words(descriptor, chapter).await;
    if let Some(reset) = resolution.chapter_reset {
        tracing::info!(
            dictionary = %descriptor.id,
            chapter,
            reset,
            "selected chapter is out of range, resetting"
        );
        storage.set_chapter(reset).await?;
    }
    Ok(resolution)
}
