use super::*;

#[test]
fn three_and_a_half_stars() {
    let b = star_breakdown(3.5, 5);
    assert_eq!(b.full, 3);
    assert_eq!(b.partial, Some(0.5));
    assert_eq!(b.empty, 1);
}

#[test]
fn integral_rating_has_no_partial_star() {
    let b = star_breakdown(4.0, 5);
    assert_eq!(b.full, 4);
    assert_eq!(b.partial, None);
    assert_eq!(b.empty, 1);
}

#[test]
fn zero_and_full_ratings() {
    assert_eq!(
        star_breakdown(0.0, 5),
        StarBreakdown {
            full: 0,
            partial: None,
            empty: 5
        }
    );
    assert_eq!(
        star_breakdown(5.0, 5),
        StarBreakdown {
            full: 5,
            partial: None,
            empty: 0
        }
    );
}

#[test]
fn out_of_range_ratings_are_clamped() {
    assert_eq!(star_breakdown(7.2, 5).full, 5);
    assert_eq!(star_breakdown(-1.0, 5).empty, 5);
}

#[test]
fn custom_max_stars() {
    let b = star_breakdown(2.25, 10);
    assert_eq!(b.full, 2);
    assert_eq!(b.partial, Some(0.25));
    assert_eq!(b.empty, 7);
}

#[test]
fn zero_count_stays_zero() {
    assert_eq!(bar_fraction(0, 100, 0.05), 0.0);
}

#[test]
fn small_counts_clamp_to_minimum_visible_size() {
    assert_eq!(bar_fraction(1, 1000, 0.05), 0.05);
}

#[test]
fn proportional_above_the_minimum() {
    assert_eq!(bar_fraction(50, 100, 0.05), 0.5);
    assert_eq!(bar_fraction(100, 100, 0.05), 1.0);
}

#[test]
fn empty_group_renders_nothing() {
    assert_eq!(bar_fraction(0, 0, 0.05), 0.0);
}
