use super::*;
use serde_json::json;

fn ability(value: serde_json::Value) -> AbilityDetail {
    serde_json::from_value(value).unwrap()
}

fn language(code: &str) -> serde_json::Value {
    json!({ "name": code, "url": format!("https://pokeapi.co/api/v2/language/{code}/") })
}

#[test]
fn test_effect_tiers_fill_missing_languages() {
    let detail = ability(json!({
        "id": 65,
        "name": "overgrow",
        "effect_entries": [
            { "effect": "Long text.", "short_effect": "Powers up Grass moves.", "language": language("en") },
            { "effect": "", "short_effect": "", "language": language("de") }
        ],
        "effect_changes": [
            { "effect_entries": [
                { "effect": "Verstärkt Pflanzen-Attacken.", "language": language("de") },
                { "effect": "Changed text.", "language": language("en") }
            ] }
        ],
        "flavor_text_entries": [
            { "flavor_text": "Augmente les attaques Plante.", "language": language("fr") },
            { "flavor_text": "Texte plus ancien.", "language": language("fr") }
        ]
    }));

    let table = effect_translations(&detail);
    assert_eq!(table.len(), 3);
    assert_eq!(table["en"].effect, "Powers up Grass moves.");
    assert_eq!(table["de"].effect, "Verstärkt Pflanzen-Attacken.");
    assert_eq!(table["fr"].effect, "Augmente les attaques Plante.");
}

#[test]
fn test_normalize_ability() {
    let detail = ability(json!({
        "id": 65,
        "name": "overgrow",
        "generation": { "name": "generation-iii", "url": "https://pokeapi.co/api/v2/generation/3/" },
        "names": [
            { "name": "Overgrow", "language": language("en") },
            { "name": "Notdünger", "language": language("de") }
        ],
        "effect_entries": [
            { "effect": "Long text.", "short_effect": "", "language": language("en") }
        ]
    }));

    let record = normalize_ability(&detail);
    assert_eq!(record.id, 65);
    assert_eq!(record.name, "overgrow");
    assert_eq!(record.effect.as_deref(), Some("Long text."));
    assert_eq!(record.name_translations["de"].name, "Notdünger");
    assert_eq!(record.effect_translations["en"].effect, "Long text.");
}

#[test]
fn test_ability_without_english_effect() {
    let detail = ability(json!({ "id": 300, "name": "mystery" }));
    let record = normalize_ability(&detail);
    assert_eq!(record.effect, None);
    assert!(record.effect_translations.is_empty());
    assert!(record.name_translations.is_empty());
}

fn tackle() -> MoveDetail {
    serde_json::from_value(json!({
        "id": 33,
        "name": "tackle",
        "accuracy": 100,
        "pp": 35,
        "priority": 0,
        "power": 40,
        "damage_class": { "name": "physical", "url": "https://pokeapi.co/api/v2/move-damage-class/2/" },
        "type": { "name": "normal", "url": "https://pokeapi.co/api/v2/type/1/" },
        "effect_entries": [
            { "effect": "Inflicts regular damage.", "short_effect": "Inflicts regular damage with no additional effect.", "language": language("en") }
        ],
        "names": [ { "name": "Tackle", "language": language("en") } ]
    }))
    .unwrap()
}

#[test]
fn test_normalize_move_without_skill() {
    let record = normalize_move(&tackle(), None);
    assert_eq!(record.power, Some(40));
    assert_eq!(record.accuracy, Some(100));
    assert_eq!(record.pp, Some(35));
    assert_eq!(record.priority, Some(0));
    assert_eq!(record.effect_chance, None);
    assert_eq!(record.damage_class.as_deref(), Some("physical"));
    assert_eq!(record.move_type.as_deref(), Some("normal"));
    assert_eq!(
        record.effect.as_deref(),
        Some("Inflicts regular damage with no additional effect.")
    );
    assert_eq!(record.name_translations["en"].name, "Tackle");
}

#[test]
fn test_skill_overrides_only_present_values() {
    let skill = Skill {
        id: 33,
        base_power: Some(50),
        base_accuracy: None,
        base_pp: Some(30),
    };
    let record = normalize_move(&tackle(), Some(&skill));
    assert_eq!(record.power, Some(50));
    assert_eq!(record.accuracy, Some(100));
    assert_eq!(record.pp, Some(30));
}

#[test]
fn test_normalize_nature() {
    let detail: NatureDetail = serde_json::from_value(json!({
        "id": 2,
        "name": "bold",
        "increased_stat": { "name": "defense", "url": "https://pokeapi.co/api/v2/stat/3/" },
        "decreased_stat": { "name": "attack", "url": "https://pokeapi.co/api/v2/stat/2/" },
        "likes_flavor": { "name": "sour", "url": "https://pokeapi.co/api/v2/berry-flavor/5/" },
        "hates_flavor": { "name": "spicy", "url": "https://pokeapi.co/api/v2/berry-flavor/1/" },
        "move_battle_style_preferences": [
            {
                "low_hp_preference": 32,
                "high_hp_preference": 30,
                "move_battle_style": { "name": "attack", "url": "https://pokeapi.co/api/v2/move-battle-style/1/" }
            }
        ]
    }))
    .unwrap();

    let record = normalize_nature(&detail);
    assert_eq!(record.increased_stat.as_deref(), Some("defense"));
    assert_eq!(record.decreased_stat.as_deref(), Some("attack"));
    assert_eq!(record.likes_flavor.as_deref(), Some("sour"));
    assert_eq!(record.hates_flavor.as_deref(), Some("spicy"));
    assert_eq!(
        record.move_battle_style_preferences,
        vec![BattleStylePreference {
            move_battle_style: Some("attack".to_string()),
            low_hp_preference: Some(32),
            high_hp_preference: Some(30),
        }]
    );
}

#[test]
fn test_neutral_nature_keeps_nulls() {
    let detail: NatureDetail =
        serde_json::from_value(json!({ "id": 1, "name": "hardy", "increased_stat": null })).unwrap();
    let record = normalize_nature(&detail);
    assert_eq!(record.increased_stat, None);
    assert!(record.move_battle_style_preferences.is_empty());
}

#[test]
fn test_generation_reason() {
    assert_eq!(
        generation_reason(Some(Generation::Ix)),
        format!("debuted in generation {}", Generation::Ix)
    );
    assert_eq!(generation_reason(None), "unknown generation");
}
