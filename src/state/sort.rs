use crate::state::data_model::{Row, RowRecord};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
    #[default]
    None,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SortState {
    pub column: Option<usize>,
    pub direction: SortDirection,
}

impl SortState {
    pub fn is_active(&self) -> bool {
        self.column.is_some() && self.direction != SortDirection::None
    }

    /// Header activation: the same column flips, another column starts ascending.
    pub fn toggle(&mut self, column: usize) {
        self.direction = match (self.column, self.direction) {
            (Some(current), SortDirection::Ascending) if current == column => {
                SortDirection::Descending
            }
            (Some(current), SortDirection::Descending) if current == column => {
                SortDirection::Ascending
            }
            _ => SortDirection::Ascending,
        };
        self.column = Some(column);
    }

    pub fn direction_for(&self, column: usize) -> SortDirection {
        match self.column {
            Some(current) if current == column => self.direction,
            _ => SortDirection::None,
        }
    }
}

/// Returns `data` ordered by `column`, or unchanged when unsorted.
pub fn sorted_view(data: &[Row], column: Option<usize>, direction: SortDirection) -> Vec<Row> {
    let order = sorted_order(data.len(), column, direction, move |idx, col| {
        data[idx].get(col).map(String::as_str).unwrap_or("")
    });
    order.into_iter().map(|idx| data[idx].clone()).collect()
}

/// Positions into `rows` in display order.
pub fn sorted_indices(rows: &[RowRecord], sort: SortState) -> Vec<usize> {
    sorted_order(rows.len(), sort.column, sort.direction, move |idx, col| {
        rows[idx].cell(col)
    })
}

fn sorted_order<'a, F>(
    len: usize,
    column: Option<usize>,
    direction: SortDirection,
    cell: F,
) -> Vec<usize>
where
    F: Fn(usize, usize) -> &'a str,
{
    let mut order: Vec<usize> = (0..len).collect();
    let Some(column) = column else {
        return order;
    };
    if direction == SortDirection::None {
        return order;
    }

    let keys: Vec<String> = (0..len).map(|idx| cell(idx, column).to_lowercase()).collect();
    order.sort_by(|&a, &b| {
        let ordering = keys[a].cmp(&keys[b]);
        match direction {
            SortDirection::Descending => ordering.reverse(),
            _ => ordering,
        }
    });
    order
}
