use common::{ButtonId, DraftId};
use criterion::{Criterion, criterion_group, criterion_main};
use document::{
    AddCategory, Button, Catalog, Change, ConfigSeed, Document, GridCategory, ItemMasterCatalog,
    PageButton, PosConfig, SwapButtons,
};
use domain::{
    Draft, DraftService, InMemoryDraftStore, SourceBundle, SourceError, SourceReader,
};

/// Builds a config of `pages` full 8x6 pages.
fn seed(pages: u32) -> ConfigSeed {
    let categories = (1..=pages)
        .map(|n| GridCategory::new(n, 8, 6, format!("Page {n}"), 1).unwrap())
        .collect();
    let page_buttons = (1..=pages)
        .flat_map(|n| {
            (1..=8).flat_map(move |col| {
                (1..=6).map(move |row| PageButton {
                    page_number: n,
                    button: Button::new(
                        col,
                        row,
                        format!("Item {col}-{row}"),
                        1,
                        format!("{n}{col}{row}"),
                        "100",
                        ButtonId::new(format!("B-{n}-{col}-{row}")),
                    )
                    .unwrap(),
                })
            })
        })
        .collect();
    ConfigSeed {
        categories,
        page_buttons,
    }
}

struct FixedReader(SourceBundle);

impl SourceReader for FixedReader {
    fn read(&self, _original_source: &[u8]) -> Result<SourceBundle, SourceError> {
        Ok(self.0.clone())
    }
}

fn bench_apply_change(c: &mut Criterion) {
    let config = PosConfig::from_source(seed(20)).unwrap();
    let draft = Draft::import(DraftId::new(), b"bench".to_vec(), Document::new(config), 100);
    let change: Change = SwapButtons::new(10, 1, 1, 8, 6).into();

    c.bench_function("domain/apply_change", |b| {
        b.iter(|| draft.apply_change(&change, "ボタン入れ替え").unwrap());
    });
}

fn bench_full_history(c: &mut Criterion) {
    let config = PosConfig::from_source(seed(20)).unwrap();
    let mut draft = Draft::import(DraftId::new(), b"bench".to_vec(), Document::new(config), 100);
    for i in 0..100 {
        let change: Change = AddCategory::new(format!("Extra {i}"), 4, 4, 1).unwrap().into();
        draft = draft.apply_change(&change, "カテゴリ追加").unwrap();
    }
    let change: Change = SwapButtons::new(1, 1, 1, 2, 2).into();

    c.bench_function("domain/apply_change_at_limit", |b| {
        b.iter(|| draft.apply_change(&change, "ボタン入れ替え").unwrap());
    });
}

fn bench_undo_redo(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let reader = FixedReader(SourceBundle {
        seed: seed(5),
        item_catalog: Catalog::default(),
        handy_catalog: Catalog::default(),
        item_master_catalog: ItemMasterCatalog::default(),
    });
    let service = DraftService::new(reader, InMemoryDraftStore::new());
    let draft = rt.block_on(async {
        let draft = service.import(b"bench".to_vec()).await.unwrap();
        service
            .swap_buttons(draft.id(), 1, (1, 1), (2, 2))
            .await
            .unwrap()
    });

    c.bench_function("domain/undo_redo", |b| {
        b.iter(|| {
            rt.block_on(async {
                service.undo(draft.id()).await.unwrap();
                service.redo(draft.id()).await.unwrap();
            });
        });
    });
}

criterion_group!(
    benches,
    bench_apply_change,
    bench_full_history,
    bench_undo_redo
);
criterion_main!(benches);
