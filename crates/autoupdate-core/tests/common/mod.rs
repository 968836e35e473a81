use std::collections::BTreeSet;

use autoupdate_core::{DataSource, IndexPath, Row, Section, Snapshot, UpdatableView};

/// Build a snapshot from `(section_id, [(row_id, content)])` tuples
#[allow(dead_code)]
pub fn snapshot(sections: &[(&str, &[(&str, &str)])]) -> Snapshot<String> {
    Snapshot::new(
        sections
            .iter()
            .map(|(id, rows)| {
                Section::new(
                    *id,
                    rows.iter()
                        .map(|(row_id, content)| Row::new(*row_id, content.to_string()))
                        .collect(),
                )
            })
            .collect(),
    )
}

/// Build a snapshot whose rows all carry empty content
#[allow(dead_code)]
pub fn ids(sections: &[(&str, &[&str])]) -> Snapshot<String> {
    Snapshot::new(
        sections
            .iter()
            .map(|(id, rows)| {
                Section::new(*id, rows.iter().map(|r| Row::new(*r, String::new())).collect())
            })
            .collect(),
    )
}

/// Data source backed by a replaceable snapshot
#[allow(dead_code)]
pub struct ModelSource {
    pub current: Snapshot<String>,
}

impl DataSource for ModelSource {
    type Content = String;

    fn snapshot(&self) -> Snapshot<String> {
        self.current.clone()
    }
}

/// One primitive call received by [`RecordingView`]
#[allow(dead_code)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewCall {
    Begin,
    End,
    RemoveSections(BTreeSet<usize>),
    InsertSections(BTreeSet<usize>),
    RemoveRows(Vec<IndexPath>),
    InsertRows(Vec<IndexPath>),
    RefreshRows(Vec<IndexPath>),
}

/// View double that records calls and tracks row counts per section
///
/// Every primitive is bounds-checked against the counts the view holds at
/// that moment, like a real table view would, and panics on a bad position.
#[allow(dead_code)]
#[derive(Debug, Default)]
pub struct RecordingView {
    pub calls: Vec<ViewCall>,
    pub row_counts: Vec<usize>,
    pub open_batches: usize,
}

#[allow(dead_code)]
impl RecordingView {
    pub fn for_snapshot<C>(snapshot: &Snapshot<C>) -> Self {
        Self {
            calls: Vec::new(),
            row_counts: snapshot.sections().iter().map(|s| s.rows().len()).collect(),
            open_batches: 0,
        }
    }

    /// Calls between begin and end, excluding the batch markers
    pub fn primitives(&self) -> Vec<ViewCall> {
        self.calls
            .iter()
            .filter(|c| !matches!(c, ViewCall::Begin | ViewCall::End))
            .cloned()
            .collect()
    }

    pub fn batch_count(&self) -> usize {
        self.calls.iter().filter(|c| **c == ViewCall::Begin).count()
    }

    fn assert_open(&self) {
        assert_eq!(self.open_batches, 1, "primitive called outside a batch");
    }

    fn row(path: &IndexPath) -> usize {
        path.row.expect("row-level primitive without a row")
    }
}

impl UpdatableView for RecordingView {
    fn remove_sections(&mut self, sections: &BTreeSet<usize>) {
        self.assert_open();
        for section in sections.iter().rev() {
            assert!(*section < self.row_counts.len(), "remove section {} out of range", section);
            self.row_counts.remove(*section);
        }
        self.calls.push(ViewCall::RemoveSections(sections.clone()));
    }

    fn insert_sections(&mut self, sections: &BTreeSet<usize>) {
        self.assert_open();
        for section in sections {
            assert!(*section <= self.row_counts.len(), "insert section {} out of range", section);
            self.row_counts.insert(*section, 0);
        }
        self.calls.push(ViewCall::InsertSections(sections.clone()));
    }

    fn remove_rows(&mut self, index_paths: &[IndexPath]) {
        self.assert_open();
        for path in index_paths {
            let count = &mut self.row_counts[path.section];
            assert!(Self::row(path) < *count, "remove row {} out of range", path);
            *count -= 1;
        }
        self.calls.push(ViewCall::RemoveRows(index_paths.to_vec()));
    }

    fn insert_rows(&mut self, index_paths: &[IndexPath]) {
        self.assert_open();
        for path in index_paths {
            let count = &mut self.row_counts[path.section];
            assert!(Self::row(path) <= *count, "insert row {} out of range", path);
            *count += 1;
        }
        self.calls.push(ViewCall::InsertRows(index_paths.to_vec()));
    }

    fn refresh_rows(&mut self, index_paths: &[IndexPath]) {
        self.assert_open();
        for path in index_paths {
            assert!(Self::row(path) < self.row_counts[path.section], "refresh row {} out of range", path);
        }
        self.calls.push(ViewCall::RefreshRows(index_paths.to_vec()));
    }

    fn begin_updates(&mut self) {
        self.open_batches += 1;
        self.calls.push(ViewCall::Begin);
    }

    fn end_updates(&mut self) {
        self.open_batches -= 1;
        self.calls.push(ViewCall::End);
    }
}
