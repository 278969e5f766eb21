//! Row generator tests - adjacency rule, ids and the preview

use std::collections::HashSet;

use tilerise::core::RowGenerator;
use tilerise::types::{TileColor, TileId, MAX_GRID_DIM};

#[test]
fn test_no_adjacent_duplicates_across_seeds() {
    for seed in 0..200 {
        let mut rows = RowGenerator::new(MAX_GRID_DIM, seed);
        for _ in 0..10 {
            let row = rows.draw();
            let colors: Vec<TileColor> = row.iter().map(|c| c.unwrap().color).collect();
            assert!(
                colors.windows(2).all(|pair| pair[0] != pair[1]),
                "seed {} produced {:?}",
                seed,
                colors
            );
        }
    }
}

#[test]
fn test_ids_are_fresh() {
    let mut rows = RowGenerator::new(6, 42);
    let mut seen = HashSet::new();
    for _ in 0..50 {
        for cell in rows.draw() {
            assert!(seen.insert(cell.unwrap().id), "id handed out twice");
        }
    }
    assert_eq!(seen.len(), 300);
}

#[test]
fn test_preview_is_next_row() {
    let mut rows = RowGenerator::new(6, 7);
    for _ in 0..5 {
        let preview = rows.preview().to_vec();
        assert_eq!(rows.draw(), preview);
    }
}

#[test]
fn test_same_seed_same_rows() {
    let mut a = RowGenerator::new(6, 1234);
    let mut b = RowGenerator::new(6, 1234);
    for _ in 0..20 {
        assert_eq!(a.draw(), b.draw());
    }
    assert!(a.next_id() > TileId(0));
}
