//! Pairwise overlap resolution between label hit-boxes.

use log::trace;

use crate::layout::LayoutState;

/// Runs `collider` on every pair of visible states whose boxes intersect.
///
/// States later in the slice have higher priority. For each state `s0`,
/// from last to first, every lower-priority state `s1` is visited from
/// nearest to farthest. The scan for `s0` stops as soon as `s0` becomes
/// hidden, and hidden `s1` candidates are skipped. The collider receives
/// `(s0, s1)`, higher priority first.
///
/// A pair is only ever presented once per pass, so a decision taken for it
/// is never revisited.
pub fn collide<F>(states: &mut [LayoutState], mut collider: F)
where
    F: FnMut(&mut LayoutState, &mut LayoutState),
{
    for i in (0..states.len()).rev() {
        let (lower, rest) = states.split_at_mut(i);
        let s0 = &mut rest[0];

        for s1 in lower.iter_mut().rev() {
            if !s0.is_visible() {
                break;
            }
            if s1.is_visible() && s0.hit_box().intersects(s1.hit_box()) {
                collider(s0, s1);
            }
        }
    }
}

/// The default collision policy.
///
/// The lower-priority label `s1` is hidden when it is hidable. Otherwise
/// `s0` is hidden when it is hidable. When neither is, the overlap is kept.
pub fn hide_lower_priority(s0: &mut LayoutState, s1: &mut LayoutState) {
    if s1.is_hidable() {
        trace!(
            dataset = s1.dataset_index(),
            item = s1.item_index();
            "Hiding overlapped label"
        );
        s1.hide();
    } else if s0.is_hidable() {
        trace!(
            dataset = s0.dataset_index(),
            item = s0.item_index();
            "Hiding label overlapping a fixed one"
        );
        s0.hide();
    }
}

#[cfg(test)]
mod tests {
    use placard_core::geometry::{Point, Size};

    use super::*;

    fn state(index: usize, x: f32, hidable: bool) -> LayoutState {
        let mut state = LayoutState::new(0, index);
        state.set_hidable(hidable);
        state
            .hit_box_mut()
            .update(Point::new(x, 0.0), Size::new(20.0, 10.0), 0.0);
        state
    }

    fn visibility(states: &[LayoutState]) -> Vec<bool> {
        states.iter().map(LayoutState::is_visible).collect()
    }

    #[test]
    fn test_lower_priority_hidable_loses() {
        let mut states = vec![state(0, 0.0, true), state(1, 10.0, true)];
        collide(&mut states, hide_lower_priority);
        assert_eq!(visibility(&states), vec![false, true]);
    }

    #[test]
    fn test_fixed_higher_priority_hides_hidable_lower() {
        let mut states = vec![state(0, 0.0, true), state(1, 10.0, false)];
        collide(&mut states, hide_lower_priority);
        assert_eq!(visibility(&states), vec![false, true]);
    }

    #[test]
    fn test_hidable_higher_priority_yields_to_fixed_lower() {
        let mut states = vec![state(0, 0.0, false), state(1, 10.0, true)];
        collide(&mut states, hide_lower_priority);
        assert_eq!(visibility(&states), vec![true, false]);
    }

    #[test]
    fn test_overlap_between_fixed_labels_is_kept() {
        let mut states = vec![state(0, 0.0, false), state(1, 10.0, false)];
        collide(&mut states, hide_lower_priority);
        assert_eq!(visibility(&states), vec![true, true]);
    }

    #[test]
    fn test_disjoint_labels_are_untouched() {
        let mut states = vec![state(0, 0.0, true), state(1, 100.0, true)];
        collide(&mut states, hide_lower_priority);
        assert_eq!(visibility(&states), vec![true, true]);
    }

    #[test]
    fn test_hidden_candidates_are_skipped() {
        let mut states = vec![state(0, 0.0, true), state(1, 10.0, true)];
        states[0].hide();

        let mut calls = 0;
        collide(&mut states, |_, _| calls += 1);
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_hidden_label_stops_its_scan() {
        // 2 yields to the fixed label 1 and must not go on to hide 0,
        // which it also overlaps.
        let mut states = vec![
            state(0, 0.0, true),
            state(1, 30.0, false),
            state(2, 15.0, true),
        ];
        collide(&mut states, hide_lower_priority);
        assert_eq!(visibility(&states), vec![true, true, false]);
    }

    #[test]
    fn test_pairs_visited_from_highest_priority() {
        let mut states = vec![state(0, 0.0, false), state(1, 5.0, false), state(2, 10.0, false)];
        let mut pairs = Vec::new();
        collide(&mut states, |s0, s1| {
            pairs.push((s0.item_index(), s1.item_index()));
        });
        assert_eq!(pairs, vec![(2, 1), (2, 0), (1, 0)]);
    }

    #[test]
    fn test_chain_of_hidable_keeps_alternating_labels() {
        // 3 hides 2, so 2 never gets to hide 1; 1 then hides 0.
        let mut states = vec![
            state(0, 0.0, true),
            state(1, 15.0, true),
            state(2, 30.0, true),
            state(3, 45.0, true),
        ];
        collide(&mut states, hide_lower_priority);
        assert_eq!(visibility(&states), vec![false, true, false, true]);
    }
}
