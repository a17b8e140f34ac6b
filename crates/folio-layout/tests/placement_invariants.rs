#![forbid(unsafe_code)]

//! Placement invariants across the public API.
//!
//! | Property            | Statement                                                |
//! |---------------------|----------------------------------------------------------|
//! | Conservation        | A move never adds, drops or duplicates a section id      |
//! | Target ordering     | After a move the target area is numbered `1..=N`         |
//! | Unknown id          | Moving an unknown id returns the input unchanged         |
//! | Self move           | Moving a section to its own slot changes nothing         |
//! | Merge identity      | `merge(base, None) == base`                              |
//! | Merge retention     | Fields the patch leaves out keep their base values       |
//!
//! ```sh
//! cargo test -p folio-layout --test placement_invariants
//! ```

use std::collections::BTreeMap;

use folio_layout::{
    Area, AreaConfig, AreaConfigPatch, LayoutStructure, LayoutStructurePatch, ResponsivePatch,
    Section, SectionKind, calculate_adjusted_index, merge, move_section, ordering_report,
    position_in_area, repair_ordering, sections_from_json, sections_in_area,
};
use proptest::prelude::*;

// ============================================================================
// Fixtures
// ============================================================================

fn section(id: &str, area: Area, order: u32) -> Section {
    Section::new(
        id,
        SectionKind::Custom,
        format!("Section {id}"),
        area,
        order,
    )
}

fn ids(sections: &[&Section]) -> Vec<String> {
    sections.iter().map(|s| s.id.to_string()).collect()
}

fn orders(sections: &[&Section]) -> Vec<u32> {
    sections.iter().map(|s| s.order).collect()
}

fn arb_area() -> impl Strategy<Value = Area> {
    prop::sample::select(Area::ALL.to_vec())
}

fn arb_sections() -> impl Strategy<Value = Vec<Section>> {
    prop::collection::vec((arb_area(), any::<bool>()), 1..16).prop_map(|rows| {
        let raw: Vec<Section> = rows
            .into_iter()
            .enumerate()
            .map(|(i, (area, enabled))| section(&format!("s{i}"), area, 0).with_enabled(enabled))
            .collect();
        repair_ordering(&raw)
    })
}

fn arb_hint() -> impl Strategy<Value = Option<String>> {
    prop::option::of("[a-z0-9]{1,6}")
}

fn arb_area_config() -> impl Strategy<Value = AreaConfig> {
    (
        any::<bool>(),
        arb_hint(),
        prop::option::of(any::<bool>()),
        arb_hint(),
        arb_hint(),
    )
        .prop_map(|(enabled, width, sticky, background, padding)| AreaConfig {
            enabled,
            width,
            sticky,
            background,
            padding,
        })
}

fn arb_area_patch() -> impl Strategy<Value = AreaConfigPatch> {
    (
        prop::option::of(any::<bool>()),
        arb_hint(),
        prop::option::of(any::<bool>()),
        arb_hint(),
        arb_hint(),
    )
        .prop_map(|(enabled, width, sticky, background, padding)| AreaConfigPatch {
            enabled,
            width,
            sticky,
            background,
            padding,
        })
}

fn arb_structure() -> impl Strategy<Value = LayoutStructure> {
    (
        "[a-z-]{1,12}",
        prop::collection::vec(arb_area_config(), 6),
        "[a-z-]{1,8}",
        "[a-z-]{1,8}",
    )
        .prop_map(|(kind, configs, mobile, tablet)| {
            let mut structure = LayoutStructure::new(kind);
            for (area, config) in Area::ALL.into_iter().zip(configs) {
                structure.areas[area] = config;
            }
            structure.responsive.mobile = mobile;
            structure.responsive.tablet = tablet;
            structure
        })
}

fn arb_patch() -> impl Strategy<Value = LayoutStructurePatch> {
    (
        prop::option::of("[a-z-]{1,12}"),
        prop::collection::btree_map(arb_area(), arb_area_patch(), 0..6),
        prop::option::of((arb_hint(), arb_hint())),
    )
        .prop_map(|(kind, areas, responsive)| LayoutStructurePatch {
            kind,
            areas,
            responsive: responsive.map(|(mobile, tablet)| ResponsivePatch { mobile, tablet }),
        })
}

// ============================================================================
// Worked example
// ============================================================================

fn example_sections() -> Vec<Section> {
    sections_from_json(
        r#"[
            {"id":"1","type":"about","name":"About","area":"main","order":1},
            {"id":"2","type":"projects","name":"Projects","area":"main","order":2},
            {"id":"3","type":"hero","name":"Hero","area":"header","order":1}
        ]"#,
    )
    .expect("example decodes")
}

#[test]
fn header_section_dropped_into_main_at_index_one() {
    let moved = move_section(&example_sections(), "3", Area::Main, Some(1));
    let main = sections_in_area(&moved, Area::Main);
    assert_eq!(ids(&main), vec!["1", "3", "2"]);
    assert_eq!(orders(&main), vec![1, 2, 3]);
    assert!(sections_in_area(&moved, Area::Header).is_empty());
    assert!(main[1].enabled);
}

#[test]
fn header_section_dropped_into_main_at_front() {
    let moved = move_section(&example_sections(), "3", Area::Main, Some(0));
    let main = sections_in_area(&moved, Area::Main);
    assert_eq!(ids(&main), vec!["3", "1", "2"]);
    assert_eq!(orders(&main), vec![1, 2, 3]);
}

#[test]
fn floating_section_is_placed_and_enabled_by_a_move() {
    let mut sections = example_sections();
    sections.push(section("pool", Area::Floating, 0).with_enabled(false));
    let moved = move_section(&sections, "pool", Area::Header, None);
    let header = sections_in_area(&moved, Area::Header);
    assert_eq!(ids(&header), vec!["3", "pool"]);
    assert!(header[1].enabled);
    assert_eq!(header[1].order, 2);
}

#[test]
fn merge_keeps_base_width_when_patch_only_toggles() {
    let base = LayoutStructure::new("sidebar-left")
        .with_area(Area::SidebarLeft, AreaConfig::enabled().with_width("280px"));
    let patch = LayoutStructurePatch {
        areas: BTreeMap::from([(
            Area::SidebarLeft,
            AreaConfigPatch {
                enabled: Some(false),
                ..AreaConfigPatch::default()
            },
        )]),
        ..LayoutStructurePatch::default()
    };
    let merged = merge(&base, Some(&patch));
    assert_eq!(
        merged.areas[Area::SidebarLeft],
        AreaConfig {
            enabled: false,
            width: Some("280px".into()),
            ..AreaConfig::default()
        }
    );
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn move_conserves_ids(
        sections in arb_sections(),
        pick in any::<prop::sample::Index>(),
        target in arb_area(),
        index in prop::option::of(0usize..20),
    ) {
        let id = sections[pick.index(sections.len())].id.clone();
        let moved = move_section(&sections, id.as_str(), target, index);
        let mut before: Vec<String> = sections.iter().map(|s| s.id.to_string()).collect();
        let mut after: Vec<String> = moved.iter().map(|s| s.id.to_string()).collect();
        before.sort();
        after.sort();
        prop_assert_eq!(before, after);
    }

    #[test]
    fn move_numbers_target_area_contiguously(
        sections in arb_sections(),
        pick in any::<prop::sample::Index>(),
        target in arb_area(),
        index in prop::option::of(0usize..20),
    ) {
        let id = sections[pick.index(sections.len())].id.clone();
        let moved = move_section(&sections, id.as_str(), target, index);
        let orders: Vec<u32> = sections_in_area(&moved, target).iter().map(|s| s.order).collect();
        let expected: Vec<u32> = (1..=orders.len() as u32).collect();
        prop_assert_eq!(orders, expected);
        if target.is_rendered() {
            prop_assert_eq!(ordering_report(&moved).issues_in(target).count(), 0);
        }
    }

    #[test]
    fn move_leaves_other_areas_untouched(
        sections in arb_sections(),
        pick in any::<prop::sample::Index>(),
        target in arb_area(),
        index in prop::option::of(0usize..20),
    ) {
        let dragged = sections[pick.index(sections.len())].id.clone();
        let moved = move_section(&sections, dragged.as_str(), target, index);
        for before in sections.iter().filter(|s| s.id != dragged && s.area != target) {
            let after = moved.iter().find(|s| s.id == before.id).expect("conserved");
            prop_assert_eq!(after, before);
        }
    }

    #[test]
    fn unknown_id_returns_input(
        sections in arb_sections(),
        target in arb_area(),
        index in prop::option::of(0usize..20),
    ) {
        prop_assert_eq!(move_section(&sections, "not-a-section", target, index), sections);
    }

    #[test]
    fn drop_on_own_slot_is_a_no_op(
        sections in arb_sections(),
        pick in any::<prop::sample::Index>(),
    ) {
        let original = sections[pick.index(sections.len())].clone();
        prop_assume!(original.enabled && original.area.is_rendered());
        let k = position_in_area(&sections, original.id.as_str(), original.area)
            .expect("section sits in its own area");
        // Hovering the top half of its own row gives raw index k.
        let id = original.id.as_str();
        let index = calculate_adjusted_index(&sections, id, original.area, Some(k));
        prop_assert_eq!(index, Some(k));
        let moved = move_section(&sections, id, original.area, index);
        for before in &sections {
            let after = moved.iter().find(|s| s.id == before.id).expect("conserved");
            prop_assert_eq!(after, before);
        }
    }

    #[test]
    fn merge_without_patch_is_identity(base in arb_structure()) {
        prop_assert_eq!(merge(&base, None), base.clone());
        prop_assert_eq!(merge(&base, Some(&LayoutStructurePatch::default())), base);
    }

    #[test]
    fn merge_retains_unpatched_fields(base in arb_structure(), patch in arb_patch()) {
        let merged = merge(&base, Some(&patch));
        prop_assert_eq!(&merged.kind, patch.kind.as_ref().unwrap_or(&base.kind));
        for area in Area::ALL {
            let got = &merged.areas[area];
            let want = &base.areas[area];
            match patch.areas.get(&area) {
                None => prop_assert_eq!(got, want),
                Some(p) => {
                    prop_assert_eq!(got.enabled, p.enabled.unwrap_or(want.enabled));
                    prop_assert_eq!(
                        &got.width,
                        if p.width.is_some() { &p.width } else { &want.width }
                    );
                    prop_assert_eq!(got.sticky, p.sticky.or(want.sticky));
                    prop_assert_eq!(
                        &got.background,
                        if p.background.is_some() { &p.background } else { &want.background }
                    );
                    prop_assert_eq!(
                        &got.padding,
                        if p.padding.is_some() { &p.padding } else { &want.padding }
                    );
                }
            }
        }
        match &patch.responsive {
            None => prop_assert_eq!(&merged.responsive, &base.responsive),
            Some(r) => {
                let want = &base.responsive;
                prop_assert_eq!(
                    &merged.responsive.mobile,
                    r.mobile.as_ref().unwrap_or(&want.mobile)
                );
                prop_assert_eq!(
                    &merged.responsive.tablet,
                    r.tablet.as_ref().unwrap_or(&want.tablet)
                );
            }
        }
    }
}
