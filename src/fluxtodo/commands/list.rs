use crate::app::TodoApp;
use crate::commands::CmdResult;
use crate::error::Result;
use crate::index::index_items;
use crate::sync::SyncAdapter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListFilter {
    #[default]
    All,
    Pending,
    Done,
}

/// Lists todos with their display index. Filtering keeps each todo's
/// position in the full list, so indexes stay valid for `toggle`.
pub fn run<A: SyncAdapter + 'static>(app: &TodoApp<A>, filter: ListFilter) -> Result<CmdResult> {
    let listed = index_items(app.items())
        .into_iter()
        .filter(|dp| match filter {
            ListFilter::All => true,
            ListFilter::Pending => !dp.item.complete,
            ListFilter::Done => dp.item.complete,
        })
        .collect();
    Ok(CmdResult::default().with_listed_items(listed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::fixtures::memory_app;
    use crate::commands::{add, toggle};
    use crate::index::DisplayIndex;
    use crate::storage::memory::MemoryStorage;

    #[test]
    fn empty_store_lists_nothing() {
        let app = memory_app(&MemoryStorage::new());
        let result = run(&app, ListFilter::All).unwrap();
        assert!(result.listed_items.is_empty());
    }

    #[test]
    fn filters_keep_original_positions() {
        let app = memory_app(&MemoryStorage::new());
        for text in ["a", "b", "c"] {
            add::run(&app, text).unwrap();
        }
        toggle::run(&app, &[DisplayIndex::new(2).unwrap()]).unwrap();

        let all = run(&app, ListFilter::All).unwrap();
        assert_eq!(all.listed_items.len(), 3);

        let done = run(&app, ListFilter::Done).unwrap();
        assert_eq!(done.listed_items.len(), 1);
        assert_eq!(done.listed_items[0].index.get(), 2);

        let pending: Vec<usize> = run(&app, ListFilter::Pending)
            .unwrap()
            .listed_items
            .iter()
            .map(|dp| dp.index.get())
            .collect();
        assert_eq!(pending, vec![1, 3]);
    }
}
