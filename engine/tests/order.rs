use engine::content::builtin_catalog;
use engine::{Actor, BattleRng, QueuedAction, Roster, Side, determine_turn_order};
use proptest::prelude::*;

fn runner(name: &str, spd: i32, side: Side) -> Actor {
    Actor {
        name: name.to_string(),
        glyph: String::new(),
        hp: 100,
        mp: 100,
        max_hp: 100,
        max_mp: 100,
        atk: 30,
        def: 20,
        spd,
        skills: Vec::new(),
        side,
    }
}

#[test]
fn priority_tier_beats_speed_for_every_seed() {
    let catalog = builtin_catalog().unwrap();
    let roster = Roster::from_actors([
        runner("Tank", 1, Side::Player),
        runner("Cat", 9, Side::Enemy),
    ]);

    for seed in 0..32 {
        let mut rng = BattleRng::from_seed(seed);
        let actions = vec![
            QueuedAction::with_skill("Cat", "attack"),  // priority 0
            QueuedAction::with_skill("Tank", "guard"),  // priority 2
        ];
        let ordered = determine_turn_order(&catalog, &roster, actions, &mut rng);
        assert_eq!(ordered[0].actor, "Tank");
        assert_eq!(ordered[1].actor, "Cat");
    }
}

#[test]
fn speed_breaks_equal_priority() {
    let catalog = builtin_catalog().unwrap();
    let roster = Roster::from_actors([
        runner("Slow", 1, Side::Player),
        runner("Fast", 9, Side::Enemy),
    ]);

    for seed in 0..32 {
        let mut rng = BattleRng::from_seed(seed);
        let actions = vec![
            QueuedAction::with_skill("Slow", "attack"),
            QueuedAction::with_skill("Fast", "attack"),
        ];
        let ordered = determine_turn_order(&catalog, &roster, actions, &mut rng);
        assert_eq!(ordered[0].actor, "Fast");
    }
}

#[test]
fn auto_entries_sort_at_priority_zero() {
    let catalog = builtin_catalog().unwrap();
    let roster = Roster::from_actors([
        runner("Guarding", 1, Side::Player),
        runner("Undecided", 9, Side::Enemy),
    ]);

    for seed in 0..32 {
        let mut rng = BattleRng::from_seed(seed);
        let actions = vec![
            QueuedAction::auto("Undecided"),
            QueuedAction::with_skill("Guarding", "guard"),
        ];
        let ordered = determine_turn_order(&catalog, &roster, actions, &mut rng);
        assert_eq!(ordered[0].actor, "Guarding");
    }
}

#[test]
fn full_ties_are_broken_randomly_not_by_insertion_order() {
    let catalog = builtin_catalog().unwrap();
    let roster = Roster::from_actors([
        runner("First", 3, Side::Player),
        runner("Second", 3, Side::Enemy),
    ]);

    let mut first_led = false;
    let mut second_led = false;
    for seed in 0..64 {
        let mut rng = BattleRng::from_seed(seed);
        let actions = vec![
            QueuedAction::with_skill("First", "attack"),
            QueuedAction::with_skill("Second", "attack"),
        ];
        let ordered = determine_turn_order(&catalog, &roster, actions, &mut rng);
        match ordered[0].actor.as_str() {
            "First" => first_led = true,
            _ => second_led = true,
        }
    }
    assert!(first_led && second_led, "tie-break should go both ways across seeds");
}

proptest! {
    #[test]
    fn ordering_is_a_speed_sorted_permutation(
        speeds in proptest::collection::vec(0i32..50, 1..10),
        seed in any::<u64>(),
    ) {
        let catalog = builtin_catalog().unwrap();
        let actors: Vec<Actor> = speeds
            .iter()
            .enumerate()
            .map(|(i, &spd)| runner(&format!("a{i}"), spd, Side::Player))
            .collect();
        let roster = Roster::from_actors(actors);
        let actions: Vec<QueuedAction> = (0..speeds.len())
            .map(|i| QueuedAction::auto(format!("a{i}")))
            .collect();

        let mut rng = BattleRng::from_seed(seed);
        let ordered = determine_turn_order(&catalog, &roster, actions, &mut rng);

        prop_assert_eq!(ordered.len(), speeds.len());
        let mut names: Vec<String> = ordered.iter().map(|a| a.actor.clone()).collect();
        names.sort();
        let mut expected: Vec<String> = (0..speeds.len()).map(|i| format!("a{i}")).collect();
        expected.sort();
        prop_assert_eq!(names, expected);

        let ordered_speeds: Vec<i32> = ordered
            .iter()
            .map(|a| roster.get(&a.actor).unwrap().spd)
            .collect();
        prop_assert!(ordered_speeds.windows(2).all(|w| w[0] >= w[1]));
    }
}
