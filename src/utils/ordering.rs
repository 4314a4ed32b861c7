use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderSlot {
    pub id: Uuid,
    pub order: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderChange {
    pub id: Uuid,
    pub from: i64,
    pub to: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReorderError {
    #[error("No job found at order {0}")]
    MissingSource(i64),
    #[error("Target order {to} is outside 0..{len}")]
    OutOfBounds { to: i64, len: usize },
}

/// Plans the moves needed to take the job at `from` to `to`.
///
/// Moving forward pulls every job in `(from, to]` back by one; moving
/// backward pushes every job in `[to, from)` forward by one. The moved job
/// takes `to`. Only slots whose order actually changes are returned, so the
/// plan for `from == to` is empty.
pub fn plan_reorder(
    slots: &[OrderSlot],
    from: i64,
    to: i64,
) -> Result<Vec<OrderChange>, ReorderError> {
    let moving = slots
        .iter()
        .find(|slot| slot.order == from)
        .ok_or(ReorderError::MissingSource(from))?;

    if to < 0 || to >= slots.len() as i64 {
        return Err(ReorderError::OutOfBounds {
            to,
            len: slots.len(),
        });
    }

    if from == to {
        return Ok(Vec::new());
    }

    let mut changes: Vec<OrderChange> = slots
        .iter()
        .filter(|slot| slot.id != moving.id)
        .filter_map(|slot| {
            let shifted = if from < to && slot.order > from && slot.order <= to {
                slot.order - 1
            } else if from > to && slot.order >= to && slot.order < from {
                slot.order + 1
            } else {
                return None;
            };
            Some(OrderChange {
                id: slot.id,
                from: slot.order,
                to: shifted,
            })
        })
        .collect();

    changes.push(OrderChange {
        id: moving.id,
        from,
        to,
    });
    Ok(changes)
}

/// Returns the slots with `changes` applied.
pub fn apply_changes(slots: &[OrderSlot], changes: &[OrderChange]) -> Vec<OrderSlot> {
    slots
        .iter()
        .map(|slot| {
            let order = changes
                .iter()
                .find(|change| change.id == slot.id)
                .map_or(slot.order, |change| change.to);
            OrderSlot { id: slot.id, order }
        })
        .collect()
}

/// True when the orders are exactly `{0, .., n-1}`.
pub fn is_dense(slots: &[OrderSlot]) -> bool {
    let mut orders: Vec<i64> = slots.iter().map(|slot| slot.order).collect();
    orders.sort_unstable();
    orders
        .iter()
        .enumerate()
        .all(|(idx, order)| *order == idx as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slots(n: usize) -> Vec<OrderSlot> {
        (0..n)
            .map(|i| OrderSlot {
                id: Uuid::new_v4(),
                order: i as i64,
            })
            .collect()
    }

    fn order_of(slots: &[OrderSlot], id: Uuid) -> i64 {
        slots.iter().find(|s| s.id == id).unwrap().order
    }

    #[test]
    fn forward_move_pulls_the_gap_back() {
        let before = slots(6);
        let changes = plan_reorder(&before, 2, 5).unwrap();
        let after = apply_changes(&before, &changes);

        assert_eq!(order_of(&after, before[2].id), 5);
        assert_eq!(order_of(&after, before[3].id), 2);
        assert_eq!(order_of(&after, before[4].id), 3);
        assert_eq!(order_of(&after, before[5].id), 4);
        assert_eq!(order_of(&after, before[0].id), 0);
        assert_eq!(order_of(&after, before[1].id), 1);
        assert_eq!(changes.len(), 4);
    }

    #[test]
    fn backward_move_pushes_the_gap_forward() {
        let before = slots(5);
        let after = apply_changes(&before, &plan_reorder(&before, 4, 1).unwrap());

        assert_eq!(order_of(&after, before[4].id), 1);
        assert_eq!(order_of(&after, before[1].id), 2);
        assert_eq!(order_of(&after, before[2].id), 3);
        assert_eq!(order_of(&after, before[3].id), 4);
        assert_eq!(order_of(&after, before[0].id), 0);
    }

    #[test]
    fn every_move_keeps_orders_dense() {
        let before = slots(6);
        for from in 0..6 {
            for to in 0..6 {
                let changes = plan_reorder(&before, from, to).unwrap();
                let after = apply_changes(&before, &changes);
                assert!(is_dense(&after), "{from} -> {to} broke density");
                assert_eq!(order_of(&after, before[from as usize].id), to);
            }
        }
    }

    #[test]
    fn same_position_plans_nothing() {
        let before = slots(3);
        assert!(plan_reorder(&before, 1, 1).unwrap().is_empty());
    }

    #[test]
    fn missing_source_is_rejected() {
        let before = slots(3);
        assert_eq!(
            plan_reorder(&before, 7, 0),
            Err(ReorderError::MissingSource(7))
        );
    }

    #[test]
    fn target_outside_range_is_rejected() {
        let before = slots(3);
        assert_eq!(
            plan_reorder(&before, 0, 3),
            Err(ReorderError::OutOfBounds { to: 3, len: 3 })
        );
        assert!(plan_reorder(&before, 0, -1).is_err());
    }

    #[test]
    fn density_check_spots_gaps_and_duplicates() {
        let mut gap = slots(3);
        gap[2].order = 3;
        assert!(!is_dense(&gap));

        let mut dup = slots(3);
        dup[2].order = 1;
        assert!(!is_dense(&dup));
    }
}
