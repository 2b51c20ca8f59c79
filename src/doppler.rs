use crate::{Item, statics};

/// Returns a copy of `items` with `display_name` set on every entry and, for
/// Doppler finishes, the detected phase/gem in `variant_name`.
///
/// The label is always built from `name`, never from a previous `display_name`,
/// so running this over already-expanded items yields the same result.
pub fn expand_doppler_variants(items: &[Item]) -> Vec<Item> {
    items.iter().map(expand_one).collect()
}

fn expand_one(item: &Item) -> Item {
    let mut out = item.clone();

    if !item.name.to_lowercase().contains(statics::DOPPLER_MARKER) {
        out.display_name = Some(item.name.clone());
        out.variant_name = None;
        return out;
    }

    let variant = detect_variant(item);
    out.display_name = Some(format!("{} | {}", item.name, variant));
    out.variant_name = Some(variant.to_string());
    out
}

fn detect_variant(item: &Item) -> &'static str {
    let finish = item.finish_text().unwrap_or_default().to_lowercase();

    statics::DOPPLER_FINISH_VARIANTS
        .iter()
        .find(|(keyword, _)| finish.contains(keyword))
        .map(|(_, label)| *label)
        .or_else(|| {
            let id = item.pattern_id()?;
            statics::DOPPLER_PATTERN_VARIANTS
                .iter()
                .find(|(pattern, _)| *pattern == id)
                .map(|(_, label)| *label)
        })
        .unwrap_or(statics::DOPPLER_UNKNOWN_VARIANT)
}
