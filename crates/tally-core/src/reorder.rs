//! Positional reordering shared by the action and multiplier sequences.

/// Move the element at `from` so that it ends up at index `to`, shifting
/// the elements in between.
///
/// Returns `false` and leaves `items` untouched when the indices are equal
/// or either one is out of bounds.
pub fn reorder<T>(items: &mut Vec<T>, from: usize, to: usize) -> bool {
    let len = items.len();
    if from == to || from >= len || to >= len {
        return false;
    }
    let item = items.remove(from);
    items.insert(to, item);
    true
}
