use std::fs;
use std::path::Path;
use std::sync::mpsc;
use std::time::Duration;

use serde_json::{Value, json};

use pokedata_api::{MemoryTransport, RetryPolicy, TransportFault};
use pokedata_core::sprite::LEGACY_SPRITE_BASE;
use pokedata_core::DatasetKind;
use pokedata_lib::{Pipeline, PipelineConfig, PipelineError, PipelineEvent, Step};

const BASE: &str = "https://pokeapi.test/api/v2";

fn config(root: &Path) -> PipelineConfig {
    let mut config = PipelineConfig::default();
    config.api.base_url = BASE.to_string();
    config.retry = RetryPolicy::default()
        .with_delay(Duration::ZERO)
        .with_max_attempts(3);
    config.paths.data_dir = root.join("data");
    config.paths.dump_dir = root.join("dump");
    config.paths.patch_file = root.join("patch_locations.json");
    config
}

fn url(path: &str) -> String {
    format!("{BASE}/{path}/")
}

fn named(name: &str, path: &str) -> Value {
    json!({ "name": name, "url": url(path) })
}

fn listing(transport: &MemoryTransport, resource: &str, entries: &[(&str, String)]) {
    let results: Vec<Value> = entries
        .iter()
        .map(|(name, path)| named(name, path))
        .collect();
    transport.respond_json(
        url(resource),
        &json!({ "count": results.len(), "next": null, "results": results }),
    );
}

fn generation(n: u8, roman: &str) -> Value {
    named(&format!("generation-{roman}"), &format!("generation/{n}"))
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

fn write_file(path: &Path, value: &Value) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, serde_json::to_string_pretty(value).unwrap()).unwrap();
}

fn keys(value: &Value) -> Vec<&str> {
    value.as_object().unwrap().keys().map(String::as_str).collect()
}

fn ability_transport() -> MemoryTransport {
    let transport = MemoryTransport::new();
    listing(
        &transport,
        "ability",
        &[
            ("overgrow", "ability/65".to_string()),
            ("protean", "ability/168".to_string()),
            ("tough-claws", "ability/181".to_string()),
            ("cacophony", "ability/76".to_string()),
            ("mystery", "ability/999".to_string()),
        ],
    );
    transport.respond_json(
        url("ability/65"),
        &json!({
            "id": 65, "name": "overgrow", "is_main_series": true,
            "generation": generation(3, "iii"),
            "names": [{ "name": "Notdünger", "language": named("de", "language/6") }],
            "effect_entries": [{
                "effect": "Long.", "short_effect": "Powers up Grass moves.",
                "language": named("en", "language/9")
            }]
        }),
    );
    transport.respond_json(
        url("ability/168"),
        &json!({ "id": 168, "name": "protean", "is_main_series": true, "generation": generation(6, "vi") }),
    );
    transport.respond_json(
        url("ability/181"),
        &json!({ "id": 181, "name": "tough-claws", "is_main_series": true, "generation": generation(6, "vi") }),
    );
    transport.respond_json(
        url("ability/76"),
        &json!({ "id": 76, "name": "cacophony", "is_main_series": false, "generation": generation(3, "iii") }),
    );
    transport
}

#[test]
fn abilities_filter_and_skip_missing_details() {
    let dir = tempfile::tempdir().unwrap();
    let transport = ability_transport();
    let pipeline = Pipeline::new(config(dir.path()), &transport);

    let report = pipeline.run(Step::Abilities).unwrap();
    assert_eq!(report.skipped, 3);
    assert_eq!(report.outputs[0].records, 2);

    let abilities = read_json(&dir.path().join("data").join("abilities-data.json"));
    assert_eq!(keys(&abilities), ["overgrow", "protean"]);
    assert_eq!(abilities["overgrow"]["effect"], "Powers up Grass moves.");
    assert_eq!(abilities["overgrow"]["name_translations"]["de"]["name"], "Notdünger");
    assert_eq!(abilities["protean"]["effect"], Value::Null);
}

#[test]
fn excluded_abilities_are_never_fetched() {
    let dir = tempfile::tempdir().unwrap();
    let transport = ability_transport();
    let mut config = config(dir.path());
    config.abilities.exclude.insert("overgrow".to_string());
    let pipeline = Pipeline::new(config, &transport);

    pipeline.run(Step::Abilities).unwrap();
    assert_eq!(transport.hits(&url("ability/65")), 0);
    let abilities = read_json(&dir.path().join("data").join("abilities-data.json"));
    assert_eq!(keys(&abilities), ["protean"]);
}

#[test]
fn abilities_without_main_series_flag_are_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let transport = MemoryTransport::new();
    listing(
        &transport,
        "ability",
        &[
            ("stench", "ability/1".to_string()),
            ("drizzle", "ability/2".to_string()),
            ("speed-boost", "ability/3".to_string()),
        ],
    );
    transport.respond_json(
        url("ability/1"),
        &json!({ "id": 1, "name": "stench", "is_main_series": true, "generation": generation(3, "iii") }),
    );
    transport.respond_json(
        url("ability/2"),
        &json!({ "id": 2, "name": "drizzle", "generation": generation(3, "iii") }),
    );
    transport.respond_json(
        url("ability/3"),
        &json!({ "id": 3, "name": "speed-boost", "is_main_series": null, "generation": generation(3, "iii") }),
    );
    let pipeline = Pipeline::new(config(dir.path()), &transport);

    let report = pipeline.run(Step::Abilities).unwrap();
    assert_eq!(report.skipped, 2);
    let abilities = read_json(&dir.path().join("data").join("abilities-data.json"));
    assert_eq!(keys(&abilities), ["stench"]);
}

#[test]
fn reruns_are_byte_identical() {
    let dir = tempfile::tempdir().unwrap();
    let transport = ability_transport();
    let pipeline = Pipeline::new(config(dir.path()), &transport);
    let path = dir.path().join("data").join("abilities-data.json");

    pipeline.run(Step::Abilities).unwrap();
    let first = fs::read(&path).unwrap();
    pipeline.run(Step::Abilities).unwrap();
    assert_eq!(first, fs::read(&path).unwrap());
    assert!(!first.ends_with(b"\n"));
}

#[test]
fn exhausted_retries_abort_without_writing() {
    let dir = tempfile::tempdir().unwrap();
    let transport = MemoryTransport::new();
    transport.fail(url("nature"), TransportFault::timeout("operation timed out"));
    let pipeline = Pipeline::new(config(dir.path()), &transport);

    let err = pipeline.run(Step::Natures).unwrap_err();
    assert!(matches!(err, PipelineError::Api(_)));
    assert_eq!(transport.hits(&url("nature")), 3);
    assert!(!dir.path().join("data").join("natures-data.json").exists());
}

#[test]
fn events_bracket_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let transport = ability_transport();
    let (tx, rx) = mpsc::channel();
    let pipeline = Pipeline::new(config(dir.path()), &transport).with_events(tx);

    pipeline.run(Step::Abilities).unwrap();
    drop(pipeline);
    let events: Vec<PipelineEvent> = rx.iter().collect();

    assert!(matches!(events.first(), Some(PipelineEvent::Started { step: Step::Abilities })));
    assert!(matches!(events.last(), Some(PipelineEvent::Completed { step: Step::Abilities })));
    assert!(events.iter().any(|e| matches!(e, PipelineEvent::Listed { total: 5 })));
    let skipped = events
        .iter()
        .filter(|e| matches!(e, PipelineEvent::Skipped { .. }))
        .count();
    assert_eq!(skipped, 3);
}

#[test]
fn moves_apply_skill_overrides_and_type_exclusion() {
    let dir = tempfile::tempdir().unwrap();
    write_file(
        &dir.path().join("dump").join("info").join("skills.json"),
        &json!([{ "id": 33, "base_power": 50, "base_accuracy": null, "base_pp": 35 }]),
    );

    let transport = MemoryTransport::new();
    listing(
        &transport,
        "move",
        &[
            ("tackle", "move/33".to_string()),
            ("shadow-rush", "move/10001".to_string()),
        ],
    );
    transport.respond_json(
        url("move/33"),
        &json!({
            "id": 33, "name": "tackle", "accuracy": 100, "pp": 35, "power": 40, "priority": 0,
            "type": named("normal", "type/1"),
            "damage_class": named("physical", "move-damage-class/2"),
            "generation": generation(1, "i")
        }),
    );
    transport.respond_json(
        url("move/10001"),
        &json!({
            "id": 10001, "name": "shadow-rush", "power": 55,
            "type": named("shadow", "type/10002"),
            "generation": generation(3, "iii")
        }),
    );

    let pipeline = Pipeline::new(config(dir.path()), &transport);
    let report = pipeline.run(Step::Moves).unwrap();
    assert_eq!(report.skipped, 1);

    let moves = read_json(&dir.path().join("data").join("moves-data.json"));
    assert_eq!(keys(&moves), ["tackle"]);
    assert_eq!(moves["tackle"]["power"], 50);
    assert_eq!(moves["tackle"]["accuracy"], 100);
    assert_eq!(moves["tackle"]["type"], "normal");
}

#[test]
fn moves_require_skill_dump() {
    let dir = tempfile::tempdir().unwrap();
    let transport = MemoryTransport::new();
    let pipeline = Pipeline::new(config(dir.path()), &transport);

    let err = pipeline.run(Step::Moves).unwrap_err();
    assert!(matches!(err, PipelineError::Dump(_)));
    assert!(transport.requests().is_empty());
}

#[test]
fn sprites_synthesize_legacy_urls_for_forms() {
    let dir = tempfile::tempdir().unwrap();
    let transport = MemoryTransport::new();
    listing(
        &transport,
        "pokemon-species",
        &[
            ("burmy", "pokemon-species/412".to_string()),
            ("froakie", "pokemon-species/656".to_string()),
        ],
    );
    transport.respond_json(
        url("pokemon-species/412"),
        &json!({
            "id": 412, "name": "burmy", "generation": generation(4, "iv"),
            "varieties": [{ "is_default": true, "pokemon": named("burmy", "pokemon/412") }]
        }),
    );
    transport.respond_json(
        url("pokemon-species/656"),
        &json!({
            "id": 656, "name": "froakie", "generation": generation(6, "vi"),
            "varieties": [{ "is_default": true, "pokemon": named("froakie", "pokemon/656") }]
        }),
    );
    transport.respond_json(
        url("pokemon/412"),
        &json!({
            "id": 412, "name": "burmy",
            "forms": [
                named("burmy", "pokemon-form/412"),
                named("burmy-plant", "pokemon-form/412"),
                named("burmy-sandy", "pokemon-form/10004"),
                named("burmy-trash", "pokemon-form/10005")
            ],
            "sprites": { "front_default": "https://img.test/412.png", "front_female": null }
        }),
    );
    transport.respond_json(
        url("pokemon-form/burmy-sandy"),
        &json!({
            "id": 10004, "name": "burmy-sandy", "form_name": "sandy",
            "sprites": {
                "front_default": "https://img.test/412-sandy.png",
                "front_shiny": "https://img.test/shiny/412-sandy.png",
                "front_female": null
            }
        }),
    );

    let pipeline = Pipeline::new(config(dir.path()), &transport);
    pipeline.run(Step::Sprites).unwrap();

    let sprites = read_json(&dir.path().join("data").join("pokemon-sprites.json"));
    assert_eq!(keys(&sprites), ["burmy", "burmy-sandy"]);
    assert_eq!(sprites["burmy"]["sprites"]["front_default"], "https://img.test/412.png");

    let legacy = &sprites["burmy-sandy"]["sprites"]["versions"]["generation-v"]["black-white"];
    assert_eq!(
        legacy["animated"]["front_default"],
        format!("{LEGACY_SPRITE_BASE}/animated/412-sandy.gif")
    );
    assert_eq!(
        legacy["animated"]["front_shiny"],
        format!("{LEGACY_SPRITE_BASE}/animated/shiny/412-sandy.gif")
    );
    assert_eq!(legacy["front_default"], format!("{LEGACY_SPRITE_BASE}/412-sandy.png"));
    assert_eq!(legacy["animated"]["front_female"], Value::Null);

    assert_eq!(transport.hits(&url("pokemon/656")), 0);
    assert_eq!(transport.hits(&url("pokemon-form/burmy")), 0);
    assert_eq!(transport.hits(&url("pokemon-form/burmy-plant")), 0);
}

#[test]
fn types_group_pokemon_and_moves() {
    let dir = tempfile::tempdir().unwrap();
    let data = dir.path().join("data");
    write_file(
        &data.join("pokemon-data.json"),
        &json!({
            "bulbasaur": { "id": 1, "types": ["grass", "poison"], "height": 7 },
            "pikachu": { "id": 25, "types": ["electric"] }
        }),
    );
    write_file(
        &data.join("moves-data.json"),
        &json!({
            "razor-leaf": { "id": 75, "type": "grass", "power": 55 },
            "ember": { "id": 52, "type": "fire" }
        }),
    );

    let transport = MemoryTransport::new();
    listing(&transport, "type", &[("grass", "type/12".to_string())]);
    transport.respond_json(
        url("type/12"),
        &json!({ "id": 12, "name": "grass", "names": [{ "name": "Plante", "language": named("fr", "language/5") }] }),
    );

    let pipeline = Pipeline::new(config(dir.path()), &transport);
    pipeline.run(Step::Types).unwrap();

    let types = read_json(&data.join("types-data.json"));
    assert_eq!(keys(&types), ["electric", "grass", "poison"]);
    assert_eq!(types["grass"]["moves"], json!([{ "name": "razor-leaf", "id": 75 }]));
    assert_eq!(types["grass"]["name_translations"]["fr"]["name"], "Plante");
    assert_eq!(types["electric"]["name_translations"], json!({}));
}

fn write_dump(root: &Path) {
    let info = root.join("dump").join("info");
    write_file(
        &info.join("monsters.json"),
        &json!([
            {
                "id": 25, "name": "Pikachu",
                "locations": [
                    { "location": "Viridian Forest (Day)", "rarity": "Rare", "region_name": "Kanto", "type": "Walking" },
                    { "location": "Power Plant", "rarity": "Common", "region_name": "Kanto" }
                ],
                "held_items": [{ "id": 213, "name": "Light Ball" }]
            },
            {
                "id": 29, "name": "Nidoran♀",
                "locations": [{ "location": "Route 3", "rarity": "Common", "region_name": "Kanto", "type": "Walking" }],
                "held_items": []
            }
        ]),
    );
    write_file(
        &info.join("items.json"),
        &json!([
            { "id": 213, "name": "Light Ball", "desc": "Boosts Pikachu.", "icon_id": 213,
              "name_string_id": 100, "desc_string_id": 101 },
            { "id": 1, "name": "Master Ball", "desc": "Catches anything.", "icon_id": 1,
              "name_string_id": "102", "desc_string_id": "103" }
        ]),
    );
}

#[test]
fn items_read_string_tables() {
    let dir = tempfile::tempdir().unwrap();
    write_dump(dir.path());
    let strings = dir.path().join("dump").join("strings");
    fs::create_dir_all(&strings).unwrap();
    fs::write(
        strings.join("dump_strings_de.xml"),
        r#"<strings><string id="100">Kugelblitz</string><string id="101">Pikachu &amp; Co.</string></strings>"#,
    )
    .unwrap();

    let mut config = config(dir.path());
    config.items.languages = vec!["de".to_string(), "fr".to_string()];
    let pipeline = Pipeline::new(config, MemoryTransport::new());
    pipeline.run(Step::Items).unwrap();

    let items = read_json(&dir.path().join("data").join("item-data.json"));
    assert_eq!(keys(&items), ["light-ball", "master-ball"]);
    assert_eq!(items["light-ball"]["name_translations"]["de"]["name"], "Kugelblitz");
    assert_eq!(items["light-ball"]["effect_translations"]["de"]["effect"], "Pikachu & Co.");
    assert_eq!(items["light-ball"]["name_translations"]["fr"]["name"], "");
    assert_eq!(items["master-ball"]["sprite"], 1);
}

#[test]
fn held_items_are_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    write_dump(dir.path());
    let data = dir.path().join("data");
    write_file(
        &data.join("pokemon-data.json"),
        &json!({
            "pikachu": { "id": 25, "gender_rate": 4, "base_experience": 112 },
            "nidoran-f": { "id": 29, "gender_rate": 8 }
        }),
    );
    write_file(
        &data.join("item-data.json"),
        &json!({ "light-ball": { "id": 213, "name": "Light Ball", "effect": "Boosts Pikachu." } }),
    );

    let pipeline = Pipeline::new(config(dir.path()), MemoryTransport::new());
    pipeline.run(Step::HeldItems).unwrap();
    let pokemon_first = fs::read(data.join("pokemon-data.json")).unwrap();
    let items_first = fs::read(data.join("item-data.json")).unwrap();

    pipeline.run(Step::HeldItems).unwrap();
    assert_eq!(pokemon_first, fs::read(data.join("pokemon-data.json")).unwrap());
    assert_eq!(items_first, fs::read(data.join("item-data.json")).unwrap());

    let pokemon = read_json(&data.join("pokemon-data.json"));
    assert_eq!(
        pokemon["pikachu"]["held_items"],
        json!([{ "id": 213, "item_name": "light-ball" }])
    );
    assert_eq!(pokemon["pikachu"]["base_experience"], 112);
    assert_eq!(pokemon["nidoran-f"]["held_items"], json!([]));

    let items = read_json(&data.join("item-data.json"));
    assert_eq!(keys(&items), ["light-ball", "master-ball"]);
    assert_eq!(
        items["light-ball"]["pokemon_with_item"],
        json!([{ "name": "pikachu", "id": 25 }])
    );
    assert!(items["master-ball"].get("pokemon_with_item").is_none());
}

#[test]
fn held_items_overwrite_any_existing_shape() {
    let dir = tempfile::tempdir().unwrap();
    write_dump(dir.path());
    let data = dir.path().join("data");
    write_file(
        &data.join("pokemon-data.json"),
        &json!({
            "pikachu": {
                "id": 25,
                "held_items": [{ "item": { "name": "oran-berry", "url": url("item/132") }, "rarity": 5 }]
            }
        }),
    );

    let pipeline = Pipeline::new(config(dir.path()), MemoryTransport::new());
    pipeline.run(Step::HeldItems).unwrap();

    let pokemon = read_json(&data.join("pokemon-data.json"));
    assert_eq!(
        pokemon["pikachu"]["held_items"],
        json!([{ "id": 213, "item_name": "light-ball" }])
    );
}

#[test]
fn gender_rates_bucket_pokemon() {
    let dir = tempfile::tempdir().unwrap();
    write_file(
        &dir.path().join("data").join("pokemon-data.json"),
        &json!({
            "eevee": { "id": 133, "gender_rate": 4 },
            "magnemite": { "id": 81, "gender_rate": -1 },
            "missingno": { "id": 0 }
        }),
    );

    let pipeline = Pipeline::new(config(dir.path()), MemoryTransport::new());
    let report = pipeline.run(Step::GenderRates).unwrap();
    assert_eq!(report.skipped, 1);

    let rates = read_json(&dir.path().join("data").join("gender-rates.json"));
    assert_eq!(keys(&rates).len(), 10);
    assert_eq!(rates["4"]["name"], "50% Female, 50% Male");
    assert_eq!(rates["4"]["pokemon_list"], json!([{ "name": "eevee", "id": 133 }]));
    assert_eq!(rates["-1"]["pokemon_list"], json!([{ "name": "magnemite", "id": 81 }]));
    assert_eq!(rates["0"]["pokemon_list"], json!([]));

    let text = fs::read_to_string(dir.path().join("data").join("gender-rates.json")).unwrap();
    assert!(text.contains(r#""female_percentage": 100,"#));
    assert!(text.contains(r#""female_percentage": 12.5,"#));
    assert_eq!(rates["-1"]["male_percentage"], json!(0));
    assert_eq!(rates["1"]["male_percentage"], json!(87.5));
}

#[test]
fn locations_apply_patch_and_feed_reports() {
    let dir = tempfile::tempdir().unwrap();
    write_dump(dir.path());
    write_file(
        &dir.path().join("patch_locations.json"),
        &json!({
            "add": { "mewtwo": [{ "location": "Cerulean Cave", "rarity": "Special" }] },
            "remove": { "pikachu": ["Viridian Forest", "Power Plant"] }
        }),
    );

    let pipeline = Pipeline::new(config(dir.path()), MemoryTransport::new());
    pipeline.run(Step::Locations).unwrap();

    let data = dir.path().join("data");
    let locations = read_json(&data.join("locations.json"));
    assert_eq!(keys(&locations), ["mewtwo", "nidoran-f"]);
    assert_eq!(locations["nidoran-f"]["locations"][0]["time"], "ALL");
    assert_eq!(locations["mewtwo"]["locations"][0]["time"], "ALL");

    let report = pipeline.run(Step::LocationReports).unwrap();
    assert_eq!(report.outputs.len(), 3);
    assert_eq!(report.outputs[0].kind, DatasetKind::LocationRarities);

    let rarities = read_json(&data.join("location-rarities.json"));
    assert_eq!(keys(&rarities), ["Common", "Special"]);
    let regions = read_json(&data.join("location-regions.json"));
    assert_eq!(keys(&regions), ["Kanto", "unknown"]);
    let types = read_json(&data.join("location-types.json"));
    assert_eq!(keys(&types), ["Walking", "unknown"]);
}

#[test]
fn locations_without_patch_keep_time_qualifiers() {
    let dir = tempfile::tempdir().unwrap();
    write_dump(dir.path());

    let pipeline = Pipeline::new(config(dir.path()), MemoryTransport::new());
    pipeline.run(Step::Locations).unwrap();

    let locations = read_json(&dir.path().join("data").join("locations.json"));
    let pikachu = &locations["pikachu"]["locations"];
    assert_eq!(pikachu[0]["location"], "Viridian Forest");
    assert_eq!(pikachu[0]["time"], "Day");
    assert_eq!(pikachu[1]["time"], "ALL");
}
