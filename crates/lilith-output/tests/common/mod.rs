#![allow(dead_code)]

use lilith_core::{AnalysisResult, ChannelKey, EffAxis, Efficiencies, ToolVersions};

pub fn versions() -> ToolVersions {
    ToolVersions::new("2.0", "22.x")
}

pub fn axis(entries: &[(&str, &str, f64)]) -> EffAxis {
    entries
        .iter()
        .map(|(prod, decay, value)| (ChannelKey::new(*prod, *decay), *value))
        .collect()
}

pub fn result(dim: u32, x: EffAxis, y: Option<EffAxis>, l: f64) -> AnalysisResult {
    AnalysisResult {
        experiment: "ATLAS".into(),
        source: "ATLAS-CONF-2019-005".into(),
        dim,
        eff: Efficiencies { x, y },
        measurement_type: if dim == 2 { "vn".into() } else { "n".into() },
        l,
    }
}

pub fn sample_results() -> Vec<AnalysisResult> {
    vec![
        result(
            2,
            axis(&[("ggH", "WW", 1.0), ("ttH", "WW", 1.0)]),
            Some(axis(&[("VBF", "WW", 1.0), ("WH", "WW", 0.5)])),
            2.5,
        ),
        result(1, axis(&[("ggH", "gammagamma", 1.0)]), None, 0.75),
        result(
            1,
            axis(&[("VBF", "tautau", 0.6), ("ggH", "tautau", 0.4)]),
            None,
            1.25,
        ),
        result(
            1,
            axis(&[("ttH", "bb", 0.5), ("ttH", "WW", 0.3), ("ttH", "tautau", 0.2)]),
            None,
            3.0,
        ),
    ]
}

/// Child elements of `node` with tag `name`.
pub fn children<'a, 'input>(
    node: roxmltree::Node<'a, 'input>,
    name: &str,
) -> Vec<roxmltree::Node<'a, 'input>> {
    node.children().filter(|n| n.has_tag_name(name)).collect()
}
