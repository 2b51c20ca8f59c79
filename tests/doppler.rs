use pretty_assertions::assert_eq;
use skindex::{Item, PatternField, expand_doppler_variants};

fn karambit(phase: Option<&str>, pattern: Option<PatternField>) -> Item {
    Item {
        name: "Karambit | Doppler".to_string(),
        phase: phase.map(str::to_string),
        pattern,
        ..Default::default()
    }
}

#[test]
fn ruby_phase_becomes_variant_label() {
    let out = expand_doppler_variants(&[karambit(Some("Ruby"), None)]);
    assert_eq!(out[0].label(), "Karambit | Doppler | Ruby");
    assert_eq!(out[0].variant_name.as_deref(), Some("Ruby"));
}

#[test]
fn pattern_id_is_used_when_no_finish_text() {
    let out = expand_doppler_variants(&[
        karambit(None, Some(PatternField::Id(421))),
        karambit(None, Some(PatternField::Text("568".to_string()))),
        karambit(None, None),
    ]);
    let labels: Vec<&str> = out.iter().map(Item::label).collect();
    assert_eq!(
        labels,
        [
            "Karambit | Doppler | Black Pearl",
            "Karambit | Doppler | Emerald",
            "Karambit | Doppler | Unknown Variant",
        ]
    );
}

#[test]
fn expanding_twice_gives_the_same_labels() {
    let once = expand_doppler_variants(&[karambit(Some("Phase 2"), None)]);
    let twice = expand_doppler_variants(&once);
    assert_eq!(once, twice);
    assert_eq!(twice[0].label(), "Karambit | Doppler | Phase 2");
}

#[test]
fn other_items_keep_their_name() {
    let fade = Item {
        name: "Karambit | Fade".to_string(),
        phase: Some("Phase 1".to_string()),
        ..Default::default()
    };
    let out = expand_doppler_variants(&[fade]);
    assert_eq!(out[0].display_name.as_deref(), Some("Karambit | Fade"));
    assert_eq!(out[0].variant_name, None);
}
