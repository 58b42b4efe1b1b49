use std::fs;

use lilith_core::serde::{from_json_slice, load_json};
use lilith_core::{
    AnalysisResult, ChannelKey, CouplingSet, LilithError, ParamValue, SignalStrengthEntry,
    SignalStrengths,
};
use serde_json::json;

#[test]
fn coupling_set_reads_flat_keys_and_extra() {
    let raw = json!({
        "tt": 1.0, "bb": 0.9, "tautau": 1.1, "cc": 1.0, "mumu": 1.0,
        "WW": 1.0, "ZZ": 1.0, "VBF": 1.0, "gammagamma": 1.2, "Zgamma": 1.0,
        "gg_decay": 1.0, "gg_prod_lhc8": 1.0,
        "extra": {
            "BRinvisible": 0.0, "BRundetected": 0.0,
            "precision": "BEST-QCD", "mass": 125, "name": "h"
        }
    });
    let bytes = serde_json::to_vec(&raw).expect("json");
    let set: CouplingSet = from_json_slice(&bytes).expect("decode");
    assert_eq!(set.couplings.len(), 12);
    assert_eq!(set.couplings["bb"], ParamValue::Number(0.9));
    assert_eq!(set.extra["precision"], ParamValue::from("BEST-QCD"));
    assert_eq!(set.extra["mass"], ParamValue::Number(125.0));
    assert_eq!(set.name().as_deref(), Some("h"));
}

#[test]
fn signal_strengths_distinguish_list_and_total() {
    let entry = SignalStrengthEntry::standard_model(125.0);
    let list = serde_json::to_vec(&vec![entry.clone()]).expect("json");
    let total = serde_json::to_vec(&entry).expect("json");

    match from_json_slice::<SignalStrengths>(&list).expect("list") {
        SignalStrengths::PerParticle(entries) => assert_eq!(entries, vec![entry.clone()]),
        other => panic!("expected list mode, got {other:?}"),
    }
    match from_json_slice::<SignalStrengths>(&total).expect("total") {
        SignalStrengths::Total(decoded) => assert_eq!(decoded, entry),
        other => panic!("expected total mode, got {other:?}"),
    }
}

#[test]
fn analysis_result_keeps_axis_order() {
    let raw = br#"{
        "experiment": "CMS",
        "source": "CMS-HIG-19-005",
        "dim": 1,
        "type": "n",
        "l": 0.42,
        "eff": {"x": {"VBF:gammagamma": 0.3, "ggH:gammagamma": 0.7}}
    }"#;
    let result: AnalysisResult = from_json_slice(raw).expect("decode");
    let keys: Vec<_> = result.eff.x.keys().cloned().collect();
    assert_eq!(
        keys,
        vec![
            ChannelKey::new("VBF", "gammagamma"),
            ChannelKey::new("ggH", "gammagamma")
        ]
    );
    assert_eq!(result.eff.y, None);
    assert_eq!(result.measurement_type, "n");
}

#[test]
fn hypothesis_file_is_loaded_from_disk() {
    let dir = tempfile::tempdir().expect("tmp dir");
    let path = dir.path().join("couplings.json");
    let set = CouplingSet::standard_model(125.09).with_coupling("tt", 0.95);
    fs::write(&path, serde_json::to_vec(&vec![set.clone()]).expect("json")).expect("write");

    let loaded: Vec<CouplingSet> = load_json(&path).expect("load");
    assert_eq!(loaded, vec![set]);

    let err = load_json::<Vec<CouplingSet>>(&dir.path().join("absent.json"))
        .expect_err("missing file");
    match err {
        LilithError::Serde(info) => {
            assert_eq!(info.code, "json-open");
            assert_eq!(
                info.context.get("path").map(String::as_str),
                Some(dir.path().join("absent.json").display().to_string().as_str())
            );
        }
        other => panic!("expected a serde error, got {other:?}"),
    }
}

#[test]
fn malformed_channel_key_is_rejected() {
    let raw = br#"{"values": {"ggHbb": 1.0}, "extra": {}}"#;
    assert!(from_json_slice::<SignalStrengthEntry>(raw).is_err());
}
