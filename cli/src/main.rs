use anyhow::Context;
use clap::{Parser, Subcommand};
use engine::content::{Encounter, builtin_catalog, default_roster};
use engine::{
    BattleRng, EventKind, QueuedAction, ResolveEvent, Roster, SkillCatalog, StatusStore,
    determine_turn_order, format_order, run_round,
};
use std::{fs, path::PathBuf};

#[derive(Subcommand)]
enum Cmd {
    /// List every skill in the catalog
    Skills {
        /// Emit the catalog as JSON instead of text
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Preview the execution order for one all-auto round
    Order {
        /// RNG seed for determinism
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
    /// Run a full automatic battle and print the event log
    Battle {
        /// RNG seed for determinism
        #[arg(long, default_value_t = 42)]
        seed: u64,
        /// Stop after this many rounds if neither side is defeated
        #[arg(long, default_value_t = 30)]
        max_rounds: u32,
        /// YAML encounter file (defaults to the built-in parties)
        #[arg(long)]
        encounter: Option<PathBuf>,
    },
}

#[derive(Parser)]
#[command(name = "battle-cli")]
#[command(about = "Turn-based battle engine harness")]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing_subscriber::filter::LevelFilter::WARN)
        .init();

    let cli = Cli::parse();
    let catalog = builtin_catalog().context("built-in skill catalog failed to load")?;

    match cli.cmd {
        Cmd::Skills { json } => {
            if json {
                let skills: Vec<_> = catalog.iter().collect();
                println!("{}", serde_json::to_string_pretty(&skills)?);
            } else {
                for skill in catalog.iter() {
                    println!(
                        "{:<14} {:<14} mp={:<3} {}",
                        skill.id, skill.name, skill.mp_cost, skill.description
                    );
                }
            }
        }
        Cmd::Order { seed } => {
            let roster = default_roster()?;
            let mut rng = BattleRng::from_seed(seed);
            let actions = roster
                .iter()
                .map(|a| QueuedAction::auto(a.name.as_str()))
                .collect();
            let ordered = determine_turn_order(&catalog, &roster, actions, &mut rng);
            for line in format_order(&roster, &ordered) {
                println!("{line}");
            }
        }
        Cmd::Battle {
            seed,
            max_rounds,
            encounter,
        } => {
            let mut roster = load_roster(encounter)?;
            run_battle(&catalog, &mut roster, seed, max_rounds);
        }
    }
    Ok(())
}

fn load_roster(encounter: Option<PathBuf>) -> anyhow::Result<Roster> {
    match encounter {
        Some(path) => {
            let text = fs::read_to_string(&path)
                .with_context(|| format!("failed to read encounter file: {}", path.display()))?;
            let encounter = Encounter::from_yaml_str(&text)
                .with_context(|| format!("failed to parse encounter file: {}", path.display()))?;
            Ok(encounter.into_roster())
        }
        None => Ok(default_roster()?),
    }
}

fn run_battle(catalog: &SkillCatalog, roster: &mut Roster, seed: u64, max_rounds: u32) {
    let mut rng = BattleRng::from_seed(seed);
    let mut store = StatusStore::new();

    for actor in roster.iter() {
        println!(
            "[JOIN] {}{} hp={} mp={} atk={} def={} spd={} ({:?})",
            actor.glyph, actor.name, actor.hp, actor.mp, actor.atk, actor.def, actor.spd, actor.side
        );
    }

    let mut rounds = 0u32;
    let outcome = loop {
        rounds += 1;
        println!("[ROUND] {rounds}");
        let outcome = run_round(catalog, roster, &mut store, Vec::new(), &mut rng);
        for event in &outcome.events {
            println!("{}", describe(event));
        }
        for expired in &outcome.expired_effects {
            println!(
                "[FADE][{}] {} wears off",
                expired.owner,
                expired.effect.key.as_str()
            );
        }
        if outcome.players_defeated || outcome.enemies_defeated || rounds >= max_rounds {
            break outcome;
        }
    };

    let winner = if outcome.enemies_defeated && !outcome.players_defeated {
        "heroes"
    } else if outcome.players_defeated && !outcome.enemies_defeated {
        "monsters"
    } else {
        "draw"
    };
    for actor in roster.iter() {
        println!("[HP] {} {}/{}", actor.name, actor.hp, actor.max_hp);
    }
    println!("[END] winner={winner} rounds={rounds}");
}

fn describe(event: &ResolveEvent) -> String {
    let targets = event.targets.join(", ");
    match event.kind {
        EventKind::Damage => format!(
            "[DMG][{}] {} -> {} −{}",
            event.actor,
            event.skill,
            targets,
            event.value.unwrap_or(0)
        ),
        EventKind::Heal => format!(
            "[HEAL][{}] {} -> {} +{}",
            event.actor,
            event.skill,
            targets,
            event.value.unwrap_or(0)
        ),
        EventKind::ApplyBuff => format!("[BUFF][{}] {} -> {}", event.actor, event.skill, targets),
        EventKind::RemoveBuff => format!(
            "[STRIP][{}] {} -> {} ({})",
            event.actor,
            event.skill,
            targets,
            event.detail.as_deref().unwrap_or("?")
        ),
        EventKind::Revive => format!(
            "[REVIVE][{}] {} -> {} at {} HP",
            event.actor,
            event.skill,
            targets,
            event.value.unwrap_or(0)
        ),
        EventKind::Miss => format!("[MISS][{}] {} -> {}", event.actor, event.skill, targets),
        EventKind::Other => format!(
            "[NOTE][{}] {} -> {} ({})",
            event.actor,
            event.skill,
            targets,
            event.detail.as_deref().unwrap_or("no effect")
        ),
    }
}
