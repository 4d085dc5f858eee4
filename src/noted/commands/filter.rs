use crate::model::Note;

/// Projects `notes` onto those matching `query`.
///
/// An empty query yields every note. Otherwise a note matches when its content
/// contains the query, ignoring case. Input order is preserved.
pub fn run<'a, I>(notes: I, query: &str) -> Vec<&'a Note>
where
    I: IntoIterator<Item = &'a Note>,
{
    if query.is_empty() {
        return notes.into_iter().collect();
    }

    let query_lower = query.to_lowercase();
    notes
        .into_iter()
        .filter(|note| note.content.to_lowercase().contains(&query_lower))
        .collect()
}
