//! Groups a diagnostic's annotations by file and assigns each multi-line annotation a rail
//! column such that no two rails visually cross.

use crate::diagnostic::Diagnostic;
use crate::error::Result;
use crate::render::located::{self, LocatedSpan, SpanKind};
use crate::source::SourceMap;

/// An annotation after its span has been resolved against its file, carrying the index of
/// the [`Annotation`](crate::diagnostic::Annotation) it came from and, for multi-line
/// annotations, its assigned rail column (0 = nearest the separator).
#[derive(Debug, Clone)]
pub struct LocatedAnnotation {
    pub ann_idx: usize,
    pub located: LocatedSpan,
    pub rail: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct FileGroup {
    pub file: u32,
    pub annotations: Vec<LocatedAnnotation>,
    pub rail_count: usize,
}

/// Groups `diagnostic`'s annotations by file, in order of each file's first appearance in
/// the annotation list, and resolves every span.
#[tracing::instrument(level = "debug", skip_all)]
pub fn classify(sources: &SourceMap, diagnostic: &Diagnostic) -> Result<Vec<FileGroup>> {
    let mut groups: Vec<FileGroup> = Vec::new();

    for (ann_idx, annotation) in diagnostic.annotations.iter().enumerate() {
        let file = sources.get(annotation.file)?;
        let located = located::resolve(file, annotation.span)?;

        let group = match groups.iter_mut().find(|g| g.file == annotation.file) {
            Some(g) => g,
            None => {
                groups.push(FileGroup { file: annotation.file, annotations: Vec::new(), rail_count: 0 });
                groups.last_mut().unwrap()
            }
        };
        group.annotations.push(LocatedAnnotation { ann_idx, located, rail: None });
    }

    for group in &mut groups {
        assign_rails(group);
    }

    Ok(groups)
}

/// Assigns rail columns to the multi-line annotations in `group`.
///
/// Annotations are ranked by "outer-ness": earliest start line first, and among ties, the
/// longest span first, original order breaking any remaining tie. The most outer annotation
/// gets the highest rail index (farthest from the separator), so a shorter span nested inside
/// a longer one never has its rail cross the longer one's.
fn assign_rails(group: &mut FileGroup) {
    let mut order: Vec<usize> = group
        .annotations
        .iter()
        .enumerate()
        .filter(|(_, a)| a.located.kind == SpanKind::MultiLine)
        .map(|(i, _)| i)
        .collect();

    order.sort_by(|&a, &b| {
        let la = &group.annotations[a].located;
        let lb = &group.annotations[b].located;
        let len_a = la.end_line0 - la.start_line0;
        let len_b = lb.end_line0 - lb.start_line0;
        la.start_line0.cmp(&lb.start_line0).then_with(|| len_b.cmp(&len_a)).then_with(|| a.cmp(&b))
    });

    let n = order.len();
    for (pos, idx) in order.into_iter().enumerate() {
        group.annotations[idx].rail = Some(n - 1 - pos);
    }
    group.rail_count = n;
}
