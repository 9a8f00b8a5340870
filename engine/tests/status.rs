use engine::content::builtin_catalog;
use engine::{BaseStats, EffectKind, RejectReason, SkillCatalog, StatKey, StatusStore};

const BASE: BaseStats = BaseStats {
    atk: 40,
    def: 30,
    spd: 4,
};

#[test]
fn non_stackable_second_application_is_rejected() {
    let catalog = builtin_catalog().unwrap();
    let mut store = StatusStore::new();

    assert!(store.add_effect_by_skill(&catalog, "Kael", "empower").applied);
    let second = store.add_effect_by_skill(&catalog, "Kael", "empower");
    assert!(!second.applied);
    assert_eq!(second.reason, Some(RejectReason::AlreadyExists));
    assert_eq!(store.effects_of("Kael").len(), 1);
}

#[test]
fn unknown_and_effectless_skills_are_rejected() {
    let catalog = builtin_catalog().unwrap();
    let mut store = StatusStore::new();

    let unknown = store.add_effect_by_skill(&catalog, "Kael", "no_such_skill");
    assert_eq!(unknown.reason, Some(RejectReason::SkillNotFound));

    // fire_bolt deals damage but carries no status payload
    let bare = store.add_effect_by_skill(&catalog, "Kael", "fire_bolt");
    assert_eq!(bare.reason, Some(RejectReason::SkillHasNoEffect));

    assert!(store.effects_of("Kael").is_empty());
}

#[test]
fn zero_duration_effects_cannot_be_stored() {
    let catalog = SkillCatalog::from_json_str(
        r#"[{
            "id": "flicker",
            "name": "Flicker",
            "kind": "buff",
            "effect": { "kind": "buff", "key": "atk", "value": 1.2, "duration": 0 },
            "mp_cost": 0,
            "target": "self",
            "description": "momentary surge"
        }]"#,
    )
    .unwrap();
    let mut store = StatusStore::new();

    let outcome = store.add_effect_by_skill(&catalog, "Kael", "flicker");
    assert!(!outcome.applied);
    assert_eq!(outcome.reason, Some(RejectReason::NoDuration));
}

#[test]
fn duration_ticks_down_and_expires_on_the_last_round() {
    let catalog = builtin_catalog().unwrap();
    let mut store = StatusStore::new();

    // stoneskin lasts three rounds
    assert!(
        store
            .add_effect_by_skill(&catalog, "Aldric", "stoneskin")
            .applied
    );

    for _ in 0..2 {
        let removed = store.tick_turn();
        assert!(removed.is_empty());
        assert!(store.has_effect("Aldric", StatKey::Def));
    }

    let removed = store.tick_turn();
    assert_eq!(removed.len(), 1);
    assert_eq!(removed[0].remaining_rounds, 0);
    assert_eq!(removed[0].effect.key, StatKey::Def);
    assert!(!store.has_effect("Aldric", StatKey::Def));
}

#[test]
fn remove_effect_filters_by_kind() {
    let catalog = builtin_catalog().unwrap();
    let mut store = StatusStore::new();
    store.add_effect_by_skill(&catalog, "Aldric", "stoneskin");

    let wrong_kind = store.remove_effect("Aldric", StatKey::Def, Some(EffectKind::Debuff));
    assert!(wrong_kind.is_empty());
    assert!(store.has_effect("Aldric", StatKey::Def));

    let removed = store.remove_effect("Aldric", StatKey::Def, Some(EffectKind::Buff));
    assert_eq!(removed.len(), 1);
    assert!(!store.has_effect("Aldric", StatKey::Def));
}

#[test]
fn buff_multiplies_and_debuff_divides() {
    let catalog = builtin_catalog().unwrap();
    let mut store = StatusStore::new();

    store.add_effect_by_skill(&catalog, "Kael", "empower"); // atk x1.5
    let stats = store.modified_stats(BASE, "Kael");
    assert_eq!(stats.atk, 60);
    assert_eq!(stats.def, 30);

    store.add_effect_by_skill(&catalog, "Orc", "corrode"); // def / 0.75
    let stats = store.modified_stats(BASE, "Orc");
    assert_eq!(stats.def, 40);
    assert_eq!(stats.atk, 40);
}

#[test]
fn speed_magnitude_rule_splits_multiplier_and_delta() {
    let catalog = builtin_catalog().unwrap();
    let mut store = StatusStore::new();

    store.add_effect_by_skill(&catalog, "Kael", "haste"); // 1.5 => multiplier
    assert_eq!(store.modified_stats(BASE, "Kael").spd, 6);

    let delta_catalog = SkillCatalog::from_json_str(
        r#"[{
            "id": "quickstep",
            "name": "Quickstep",
            "kind": "buff",
            "effect": { "kind": "buff", "key": "spd", "value": 0.9, "duration": 2 },
            "mp_cost": 0,
            "target": "self",
            "description": "a small step ahead"
        }]"#,
    )
    .unwrap();
    store.add_effect_by_skill(&delta_catalog, "Sable", "quickstep"); // 0.9 => +round(0.9)
    assert_eq!(store.modified_stats(BASE, "Sable").spd, 5);
}

#[test]
fn magic_resist_keeps_the_lowest_multiplier() {
    let catalog = SkillCatalog::from_json_str(
        r#"[
            {
                "id": "lesser_ward",
                "name": "Lesser Ward",
                "kind": "buff",
                "effect": { "kind": "buff", "key": "magic_resist", "value": 0.8, "duration": 3 },
                "mp_cost": 0,
                "target": "self",
                "description": "thin veil"
            },
            {
                "id": "greater_ward",
                "name": "Greater Ward",
                "kind": "buff",
                "effect": { "kind": "buff", "key": "magic_resist", "value": 0.5, "duration": 3 },
                "mp_cost": 0,
                "target": "self",
                "description": "thick veil"
            }
        ]"#,
    )
    .unwrap();
    let mut store = StatusStore::new();
    store.add_effect_by_skill(&catalog, "Lyra", "lesser_ward");
    store.add_effect_by_skill(&catalog, "Lyra", "greater_ward");

    let stats = store.modified_stats(BASE, "Lyra");
    assert_eq!(stats.magic_resist, 0.5);
}

#[test]
fn modified_stats_reads_are_idempotent() {
    let catalog = builtin_catalog().unwrap();
    let mut store = StatusStore::new();
    store.add_effect_by_skill(&catalog, "Kael", "empower");
    store.add_effect_by_skill(&catalog, "Kael", "haste");

    let first = store.modified_stats(BASE, "Kael");
    let second = store.modified_stats(BASE, "Kael");
    assert_eq!(first, second);
    assert_eq!(store.effects_of("Kael").len(), 2);
}

#[test]
fn clear_drops_every_instance() {
    let catalog = builtin_catalog().unwrap();
    let mut store = StatusStore::new();
    store.add_effect_by_skill(&catalog, "Kael", "empower");
    store.add_effect_by_skill(&catalog, "Aldric", "stoneskin");

    store.clear();
    assert!(store.effects_of("Kael").is_empty());
    assert!(store.effects_of("Aldric").is_empty());
    assert!(store.tick_turn().is_empty());
}
