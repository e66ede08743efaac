//! End-to-end solving scenarios.

use folio_core::{FailReason, Snapshot};
use folio_layout::prelude::*;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn flow_box(width: f64, height: f64) -> Element {
    Element::rect(width, height)
        .with_condition(Align::left_to_left())
        .with_condition(Float::top())
}

fn text(height: f64, content_height: f64, next: Option<ElementId>) -> Element {
    Element::text(
        100.0,
        height,
        TextContent {
            content_width: 90.0,
            content_height,
            first_baseline: 10.0,
            line_height: 12.0,
            next,
        },
    )
    .with_condition(Overflow2Next::new())
}

fn content_height(page: &Page, id: ElementId) -> f64 {
    page.element(id).unwrap().text_content().unwrap().content_height
}

#[test]
fn scenario_a_single_box_floats_to_top_left() {
    init_tracing();
    let mut page = Page::new(500.0, 500.0);
    let id = page
        .add_to_root(flow_box(100.0, 50.0).at(123.0, 321.0))
        .unwrap();

    let score = solve_page(&mut page).unwrap();
    let element = page.element(id).unwrap();
    assert_eq!((element.left(), element.top()), (0.0, 0.0));
    assert!(score.is_clean());
    // One pass moves it, a second confirms nothing else changes.
    assert_eq!(score.passes, 2);
}

#[test]
fn scenario_b_second_box_flows_below_first() {
    init_tracing();
    let mut page = Page::new(500.0, 500.0);
    let first = page.add_to_root(flow_box(100.0, 50.0).at(200.0, 200.0)).unwrap();
    let second = page.add_to_root(flow_box(80.0, 30.0).at(300.0, 10.0)).unwrap();

    let score = solve_page(&mut page).unwrap();
    let first = page.element(first).unwrap();
    let second = page.element(second).unwrap();
    assert_eq!(second.left(), 0.0);
    assert_eq!(second.top(), first.top() + first.height());
    assert!(score.is_clean());
}

#[test]
fn scenario_c_fit_takes_parent_inner_width() {
    init_tracing();
    for initial in [0.0, 17.5, 400.0, 1234.0] {
        let mut page = Page::new(400.0, 300.0);
        let id = page
            .add_to_root(Element::rect(initial, 20.0).at(50.0, 0.0).with_condition(Fit::width()))
            .unwrap();
        let score = solve_page(&mut page).unwrap();
        assert_eq!(page.element(id).unwrap().width(), 400.0);
        assert!(score.is_clean());
    }
}

#[test]
fn scenario_d_budget_of_one_with_conflicting_conditions() {
    init_tracing();
    let build = || {
        let mut page = Page::new(100.0, 100.0);
        let id = page
            .add_to_root(
                Element::rect(20.0, 20.0)
                    .at(40.0, 0.0)
                    .with_condition(Align::left_to_left())
                    .with_condition(Align::right_to_right()),
            )
            .unwrap();
        (page, id)
    };

    let (mut page, id) = build();
    let score = Solver::new(SolveOptions::new(1).unwrap())
        .solve(&mut page)
        .unwrap();
    assert_eq!(score.passes, 1);
    assert!(!score.fails.is_empty());
    assert_eq!(score.fails[0].element, id);
    assert_eq!(score.fails[0].condition, "Left2Left");

    // Exactly one pass worth of writes: each condition applied once, in order.
    let (mut manual, manual_id) = build();
    let mut scratch = Score::new();
    Align::left_to_left().solve(&mut manual, manual_id, &mut scratch).unwrap();
    Align::right_to_right().solve(&mut manual, manual_id, &mut scratch).unwrap();
    assert_eq!(page.placements(), manual.placements());
    assert_eq!(page.element(id).unwrap().left(), 80.0);
}

#[test]
fn budget_of_one_stops_an_overflow_chain_partway() {
    init_tracing();
    // Children are listed against the link direction, so the overflow
    // reaches one more box per pass.
    let mut page = Page::new(400.0, 400.0);
    let c = page.add_to_root(text(100.0, 0.0, None)).unwrap();
    let b = page.add_to_root(text(100.0, 0.0, Some(c))).unwrap();
    let a = page.add_to_root(text(100.0, 250.0, Some(b))).unwrap();

    let budget = SolveOptions::new(1).unwrap();
    let score = Solver::new(budget).solve(&mut page).unwrap();
    assert_eq!(score.passes, budget.max_passes);
    assert!(!score.is_clean());
    assert_eq!(score.fails.len(), 1);
    assert_eq!(score.fails[0].element, b);
    assert_eq!(score.fails[0].reason, FailReason::Unsatisfied);
    assert_eq!(content_height(&page, a), 100.0);
    assert_eq!(content_height(&page, b), 150.0);
    assert_eq!(content_height(&page, c), 0.0);

    // With room to run the same page settles.
    let score = solve_page(&mut page).unwrap();
    assert!(score.is_clean());
    assert_eq!(content_height(&page, b), 100.0);
    assert_eq!(content_height(&page, c), 50.0);
}

#[test]
fn overflow_chain_converges_over_several_passes() {
    init_tracing();
    let mut page = Page::new(400.0, 400.0);
    let c = page.add_to_root(text(100.0, 0.0, None)).unwrap();
    let b = page.add_to_root(text(100.0, 0.0, Some(c))).unwrap();
    page.add_to_root(text(100.0, 250.0, Some(b))).unwrap();

    let score = solve_page(&mut page).unwrap();
    assert_eq!(score.passes, 3);
    assert_eq!(score.fixed, 2);
    assert_eq!(score.satisfied, 1);
    assert!(score.is_clean());
}

#[test]
fn zero_conditions_leave_geometry_alone() {
    init_tracing();
    let mut page = Page::new(500.0, 500.0).with_padding(Sides::uniform(25.0));
    let group = page.add_to_root(Element::group(200.0, 200.0).at(13.0, 17.0)).unwrap();
    page.add(group, Element::rect(20.0, 20.0).at(-5.0, 300.0)).unwrap();
    page.add_to_root(Element::rect(0.0, 0.0).at(499.0, 1.0)).unwrap();
    let before = page.placements();

    let score = solve_page(&mut page).unwrap();
    assert_eq!(page.placements(), before);
    assert!(score.is_clean());
    assert_eq!(score.result, 0.0);
    assert_eq!(score.passes, 1);
}

#[test]
fn satisfied_alignment_performs_no_mutation() {
    init_tracing();
    let config = ConditionConfig::new(0.01).unwrap();
    let mut page = Page::new(500.0, 500.0).with_padding(Sides::uniform(10.0));
    page.add_to_root(
        Element::rect(50.0, 50.0)
            .at(10.005, 200.0)
            .with_condition(Align::left_to_left().with_config(config)),
    )
    .unwrap();
    let before: Snapshot = page.tree().snapshot();

    let score = solve_page(&mut page).unwrap();
    assert_eq!(page.tree().snapshot(), before);
    assert!(score.is_clean());
    assert_eq!(score.satisfied, 1);
    assert_eq!(score.fixed, 0);
}

#[test]
fn solving_twice_is_idempotent() {
    init_tracing();
    let grid = ColumnGrid::uniform_columns(5, 50.0, 5.0).unwrap();
    let mut page = Page::new(315.0, 600.0)
        .with_padding(Sides::uniform(20.0))
        .with_grid(grid)
        .with_baseline_grid(BaselineGrid::new(12.0).unwrap());
    for index in 0..6 {
        page.add_to_root(
            Element::rect(10.0, 25.0 + index as f64)
                .with_condition(GridPlacement::fit_column_span(index % 4, 2))
                .with_condition(Float::top()),
        )
        .unwrap();
    }
    page.add_to_root(
        Element::rect(10.0, 10.0)
            .at(300.0, 505.0)
            .with_condition(Baseline2Grid::down()),
    )
    .unwrap();

    let first = solve_page(&mut page).unwrap();
    let settled = page.placements();
    let second = solve_page(&mut page).unwrap();
    assert_eq!(page.placements(), settled);
    assert_eq!(second.fails, first.fails);
    assert!(second.is_clean());
    assert_eq!(second.passes, 1);
    assert_eq!(second.fixed, 0);
}

#[test]
fn later_condition_wins_a_conflict() {
    init_tracing();
    let conflicted = |first: Align, second: Align| {
        let mut page = Page::new(100.0, 100.0);
        let id = page
            .add_to_root(
                Element::rect(20.0, 20.0)
                    .at(40.0, 0.0)
                    .with_condition(first)
                    .with_condition(second),
            )
            .unwrap();
        let score = Solver::new(SolveOptions::new(10).unwrap())
            .solve(&mut page)
            .unwrap();
        (page.element(id).unwrap().left(), score)
    };

    let (left, score) = conflicted(Align::left_to_left(), Align::right_to_right());
    assert_eq!(left, 80.0);
    assert_eq!(score.passes, 10);
    assert_eq!(score.fails.len(), 1);
    assert_eq!(score.fails[0].condition, "Left2Left");

    let (left, score) = conflicted(Align::right_to_right(), Align::left_to_left());
    assert_eq!(left, 0.0);
    assert_eq!(score.fails[0].condition, "Right2Right");
}

#[test]
fn overflow_to_removed_element_is_reported() {
    init_tracing();
    let mut page = Page::new(400.0, 400.0);
    let next = page.add_to_root(text(100.0, 0.0, None)).unwrap();
    let source = page
        .add_to_root(text(100.0, 180.0, Some(next)).with_name("story"))
        .unwrap();
    page.tree_mut().remove(next).unwrap();

    let score = solve_page(&mut page).unwrap();
    assert_eq!(score.fails.len(), 1);
    assert_eq!(score.fails[0].element, source);
    assert_eq!(score.fails[0].element_name, "story");
    assert_eq!(
        score.fails[0].reason,
        FailReason::Unsatisfiable(format!("next element {next} no longer exists"))
    );
    assert_eq!(content_height(&page, source), 180.0);
}

#[test]
fn column_example_places_on_padded_grid() {
    init_tracing();
    let grid = ColumnGrid::uniform_columns(5, 50.0, 5.0).unwrap();
    let mut page = Page::new(315.0, 400.0)
        .with_padding(Sides::uniform(20.0))
        .with_grid(grid);
    let id = page
        .add_to_root(Element::rect(30.0, 30.0).with_condition(GridPlacement::left_to_column(1)))
        .unwrap();

    let score = solve_page(&mut page).unwrap();
    assert_eq!(page.element(id).unwrap().left(), 75.0);
    assert!(score.is_clean());
}

#[test]
fn bottom_left_pages_report_in_their_own_origin() {
    init_tracing();
    let mut page = Page::new(500.0, 800.0).with_origin(Origin::BottomLeft);
    let id = page
        .add_to_root(
            Element::rect(100.0, 50.0)
                .at(20.0, 300.0)
                .with_condition(Align::left_to_left())
                .with_condition(Float::bottom()),
        )
        .unwrap();

    let score = solve_page(&mut page).unwrap();
    assert!(score.is_clean());
    assert_eq!(page.rect_in_origin(id).unwrap(), Rect::new(0.0, 0.0, 100.0, 50.0));
    assert_eq!(page.placements()[1], (id, Rect::new(0.0, 0.0, 100.0, 50.0)));
}

#[test]
fn container_shrinks_onto_children_and_settles() {
    init_tracing();
    let mut page = Page::new(500.0, 500.0);
    let group = page
        .add_to_root(
            Element::group(300.0, 300.0)
                .at(50.0, 50.0)
                .with_padding(Sides::uniform(10.0))
                .with_condition(ShrinkToChildren::all()),
        )
        .unwrap();
    let first = page.add(group, Element::rect(100.0, 40.0).at(60.0, 80.0)).unwrap();
    page.add(group, Element::rect(40.0, 40.0).at(200.0, 150.0)).unwrap();
    let before = page.tree().absolute_rect(first).unwrap();

    let score = solve_page(&mut page).unwrap();
    assert!(score.is_clean());
    assert_eq!(score.passes, 2);
    assert_eq!(page.element(group).unwrap().rect, Rect::new(100.0, 120.0, 200.0, 130.0));
    assert_eq!(page.tree().absolute_rect(first).unwrap(), before);
}

#[test]
fn corner_float_stacks_a_row() {
    init_tracing();
    let mut page = Page::new(300.0, 300.0);
    let ids: Vec<_> = (0..3)
        .map(|_| {
            page.add_to_root(
                Element::rect(100.0, 40.0)
                    .at(200.0, 0.0)
                    .with_condition(Float::top().then(Direction::Left).unwrap()),
            )
            .unwrap()
        })
        .collect();

    let score = solve_page(&mut page).unwrap();
    assert!(score.is_clean());
    let lefts: Vec<_> = ids.iter().map(|&id| page.element(id).unwrap().left()).collect();
    assert_eq!(lefts, vec![0.0, 100.0, 200.0]);
    for &id in &ids {
        assert_eq!(page.element(id).unwrap().top(), 0.0);
    }
}

#[test]
fn structural_errors_are_distinct_from_failures() {
    init_tracing();
    let mut page = Page::new(400.0, 400.0);
    page.add_to_root(Element::rect(0.0, 40.0).with_condition(Scale::width()))
        .unwrap();
    let err = solve_page(&mut page).unwrap_err();
    assert!(matches!(err, LayoutError::DegenerateExtent { .. }));
}

mod properties {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn unconstrained_pages_are_untouched(
            boxes in prop::collection::vec((-100.0f64..600.0, -100.0f64..600.0, 0.0f64..300.0, 0.0f64..300.0), 0..12)
        ) {
            let mut page = Page::new(500.0, 500.0);
            for (x, y, w, h) in boxes {
                page.add_to_root(Element::rect(w, h).at(x, y)).unwrap();
            }
            let before = page.tree().snapshot();
            let score = solve_page(&mut page).unwrap();
            prop_assert_eq!(page.tree().snapshot(), before);
            prop_assert!(score.is_clean());
        }

        #[test]
        fn fit_fills_any_positive_inner_width(width in 1.0f64..2000.0, pad in 0.0f64..0.4, initial in 0.0f64..500.0) {
            let padding = width * pad;
            let mut page = Page::new(width, 100.0).with_padding(Sides::symmetric(padding, 0.0));
            let id = page
                .add_to_root(Element::rect(initial, 10.0).with_condition(Fit::width()))
                .unwrap();
            let score = solve_page(&mut page).unwrap();
            prop_assert!(score.is_clean());
            let element = page.element(id).unwrap();
            prop_assert!((element.width() - (width - 2.0 * padding)).abs() < 1e-9);
        }
    }
}
