use crate::model::Category;
use shared::domain::responses::CategoryResponse;
use std::collections::HashMap;

/// Links flat rows into trees rooted at the categories without a parent.
///
/// Siblings keep the order of `rows`. A row whose ancestry never reaches a
/// root (a parent cycle) is not reachable and is left out.
pub fn build_category_forest(rows: Vec<Category>) -> Vec<CategoryResponse> {
    let mut children: HashMap<String, Vec<Category>> = HashMap::new();
    let mut roots = Vec::new();

    for row in rows {
        match row.parent_category_id.clone() {
            Some(parent) => children.entry(parent).or_default().push(row),
            None => roots.push(row),
        }
    }

    // Pre-order walk with an explicit stack; each entry remembers its parent's slot.
    let mut order: Vec<(Option<usize>, Category)> = Vec::new();
    let mut pending: Vec<(Option<usize>, Category)> =
        roots.into_iter().rev().map(|root| (None, root)).collect();

    while let Some((parent, row)) = pending.pop() {
        let slot = order.len();
        if let Some(kids) = children.remove(&row.id) {
            pending.extend(kids.into_iter().rev().map(|kid| (Some(slot), kid)));
        }
        order.push((parent, row));
    }

    // Walking the pre-order backwards finishes every child before its parent.
    let mut built: Vec<Vec<CategoryResponse>> = order.iter().map(|_| Vec::new()).collect();
    let mut forest = Vec::new();

    for (slot, (parent, row)) in order.into_iter().enumerate().rev() {
        let mut child_categories = std::mem::take(&mut built[slot]);
        child_categories.reverse();

        let node = CategoryResponse {
            id: row.id,
            name: row.name,
            parent_category_id: row.parent_category_id,
            child_categories,
        };

        match parent {
            Some(parent) => built[parent].push(node),
            None => forest.push(node),
        }
    }

    forest.reverse();
    forest
}
