// Timezone reorder drag
//
// A drag starts on a row's handle. While it moves, the candidate index is
// recomputed against the other handles; on release the pair becomes a
// remove-then-insert move.

use crate::services::grid::GridPoint;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReorderDrag {
    pub source_index: usize,
    pub candidate_index: usize,
    pub pointer: Option<GridPoint>,
}

impl ReorderDrag {
    pub fn begin(source_index: usize) -> Self {
        Self {
            source_index,
            candidate_index: source_index,
            pointer: None,
        }
    }

    /// `handle_centers` are the cross-axis centres of every handle (the axis
    /// rows stack along), in list order, including the dragged one.
    pub fn update(&mut self, pointer: GridPoint, pointer_offset: f32, handle_centers: &[f32]) {
        self.pointer = Some(pointer);
        self.candidate_index = candidate_index(self.source_index, pointer_offset, handle_centers);
    }

    /// `(from, to)` if the drop would change the order.
    pub fn target(&self) -> Option<(usize, usize)> {
        (self.candidate_index != self.source_index)
            .then_some((self.source_index, self.candidate_index))
    }
}

/// Number of other handles whose centre lies before the pointer. With
/// remove-then-insert semantics this is exactly the destination index.
pub fn candidate_index(source_index: usize, pointer_offset: f32, handle_centers: &[f32]) -> usize {
    handle_centers
        .iter()
        .enumerate()
        .filter(|(index, center)| *index != source_index && **center < pointer_offset)
        .count()
}
