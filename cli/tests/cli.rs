use assert_cmd::Command;
use predicates::prelude::*;

fn battle_cli() -> Command {
    Command::cargo_bin("cli").unwrap()
}

#[test]
fn skills_lists_the_catalog() {
    battle_cli()
        .args(["skills"])
        .assert()
        .success()
        .stdout(predicate::str::contains("attack"))
        .stdout(predicate::str::contains("mass_raise"));
}

#[test]
fn skills_json_emits_parseable_output() {
    let output = battle_cli().args(["skills", "--json"]).output().unwrap();
    assert!(output.status.success());
    let skills: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(skills.as_array().map(Vec::len), Some(29));
}

#[test]
fn order_is_deterministic_per_seed() {
    let first = battle_cli()
        .args(["order", "--seed", "9"])
        .output()
        .unwrap();
    let second = battle_cli()
        .args(["order", "--seed", "9"])
        .output()
        .unwrap();
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn battle_replays_identically_for_the_same_seed() {
    let first = battle_cli()
        .args(["battle", "--seed", "3", "--max-rounds", "10"])
        .output()
        .unwrap();
    let second = battle_cli()
        .args(["battle", "--seed", "3", "--max-rounds", "10"])
        .output()
        .unwrap();
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);

    let text = String::from_utf8(first.stdout).unwrap();
    assert!(text.contains("[END] winner="));
}

#[test]
fn battle_loads_a_custom_encounter() {
    let yaml = r#"
heroes:
  - name: Duelist
    hp: 100
    mp: 20
    atk: 40
    def: 20
    spd: 5
    skills: [double_slash]
monsters:
  - name: Dummy
    hp: 60
    mp: 0
    atk: 10
    def: 10
    spd: 1
    skills: []
"#;
    let path = std::env::temp_dir().join("battle-cli-test-encounter.yaml");
    std::fs::write(&path, yaml).unwrap();

    battle_cli()
        .args(["battle", "--seed", "1", "--encounter"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Duelist"))
        .stdout(predicate::str::contains("Dummy"));

    std::fs::remove_file(&path).ok();
}

#[test]
fn a_missing_encounter_file_fails_cleanly() {
    battle_cli()
        .args(["battle", "--encounter", "/no/such/file.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read encounter file"));
}
