//! `wakgear solve`: search the catalog and print the best sets.

use std::path::PathBuf;

use anyhow::{Context, Result};
use buildcodes::build_code_from_items;
use clap::Parser;
use console::style;
use gear_content::{Catalog, CatalogLoader, ConfigLoader};
use gear_core::{ClassName, Elements, Locale, NegativePolicy, SolverConfig};
use solver::{CandidatePool, Solution, Solver, percent};

use crate::config::CliEnv;
use crate::dirs;

/// Search the catalog for the best gear sets
///
/// Flags override values from `--config`; unset flags keep them.
#[derive(Parser, Debug)]
pub struct Solve {
    /// Character level (20, 35, ..., 230)
    #[arg(long = "lv", value_name = "LEVEL")]
    level: Option<u16>,

    /// Levels below `--lv` still considered
    #[arg(long)]
    tolerance: Option<u16>,

    /// Minimum AP
    #[arg(long, allow_negative_numbers = true)]
    ap: Option<i32>,

    /// Minimum MP
    #[arg(long, allow_negative_numbers = true)]
    mp: Option<i32>,

    /// Minimum WP
    #[arg(long, allow_negative_numbers = true)]
    wp: Option<i32>,

    /// Minimum range
    #[arg(long, allow_negative_numbers = true)]
    ra: Option<i32>,

    /// Minimum crit chance, before the 3% every character has
    #[arg(long = "crit", allow_negative_numbers = true)]
    min_crit: Option<i32>,

    /// Number of elements the build hits with (1-4)
    #[arg(long)]
    num_mastery: Option<u8>,

    /// Elements to favor on random-element items (e.g. `fire,air`)
    #[arg(long, value_parser = parse_elements)]
    elements: Option<Elements>,

    #[arg(long)]
    class: Option<ClassName>,

    #[arg(long)]
    distance: bool,

    #[arg(long)]
    melee: bool,

    #[arg(long)]
    berserk: bool,

    #[arg(long)]
    rear: bool,

    #[arg(long)]
    heal: bool,

    /// Crit mastery counts as elemental mastery once crit reaches 40%
    #[arg(long)]
    unraveling: bool,

    /// How negative berserk mastery counts when not optimizing it
    #[arg(long, value_name = "POLICY")]
    count_negative_zerk: Option<NegativePolicy>,

    /// How negative rear mastery counts when not optimizing it
    #[arg(long, value_name = "POLICY")]
    count_negative_rear: Option<NegativePolicy>,

    // ===== character baseline =====
    #[arg(long, allow_negative_numbers = true)]
    my_base_crit: Option<i32>,

    #[arg(long)]
    my_base_mastery: Option<i32>,

    #[arg(long)]
    my_base_crit_mastery: Option<i32>,

    #[arg(long)]
    base_ap: Option<i32>,

    #[arg(long)]
    base_mp: Option<i32>,

    #[arg(long)]
    base_range: Option<i32>,

    #[arg(long)]
    base_wp: Option<i32>,

    // ===== weapons =====
    /// Allow shields as off-hand weapons
    #[arg(long)]
    no_skip_shields: bool,

    /// Consider an empty second hand filled by the light weapon expert passive
    #[arg(long)]
    try_light_weapon_expert: bool,

    /// Wield-type passive: two-handed weapons only, trading 2 MP for 2 AP
    #[arg(long = "use-wield-type-2h", conflicts_with = "skip_two_handed_weapons")]
    wield_two_handed: bool,

    #[arg(long)]
    skip_two_handed_weapons: bool,

    // ===== item lists =====
    /// Item name to exclude (repeatable)
    #[arg(long = "forbid", value_name = "NAME")]
    forbid_names: Vec<String>,

    /// Item ids to exclude
    #[arg(long = "id-forbid", value_delimiter = ',', value_name = "IDS")]
    forbid_ids: Vec<u32>,

    /// Item ids every set must contain
    #[arg(long = "id-force", value_delimiter = ',', value_name = "IDS")]
    force_ids: Vec<u32>,

    /// Item name every set must contain (repeatable)
    #[arg(long = "name-force", value_name = "NAME")]
    force_names: Vec<String>,

    /// Rarity ordinals to allow (1 common .. 7 souvenir)
    #[arg(long = "allowed-rarity", value_delimiter = ',', value_name = "RARITIES")]
    allowed_rarities: Vec<u8>,

    /// Rarity ordinals to exclude
    #[arg(long = "forbid-rarity", value_delimiter = ',', value_name = "RARITIES")]
    forbid_rarities: Vec<u8>,

    /// Locale used for item names, both in lists and output
    #[arg(long)]
    locale: Option<Locale>,

    // ===== search =====
    /// Show the pruned candidate pool instead of searching
    #[arg(long)]
    dry_run: bool,

    /// Keep every candidate and relic/epic pair instead of the best few per slot
    ///
    /// Every relic/epic pair is searched to the end either way; there is no
    /// early stop.
    #[arg(long)]
    exhaustive: bool,

    /// Candidates kept per slot, with room reserved for AP, MP, range and WP carriers
    #[arg(long)]
    search_depth: Option<usize>,

    /// Upper bound on weapon sets and relic/epic pairs
    #[arg(long)]
    hard_cap_depth: Option<usize>,

    // ===== inputs and output =====
    /// TOML file with solver settings
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Catalog bundle or raw item export
    #[arg(long, value_name = "PATH")]
    catalog: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    /// Print every kept set, not just the best
    #[arg(long)]
    all: bool,
}

impl Solve {
    pub fn execute(self, env: &CliEnv) -> Result<()> {
        let base = match &self.config {
            Some(path) => ConfigLoader::load(path)?,
            None => SolverConfig::new(),
        };
        let config = self.apply(base);

        let catalog = self.load_catalog(env)?;
        let solver = Solver::new(&catalog, config)?;

        if solver.config().dry_run {
            let pool = solver.dry_run()?;
            return self.print_pool(&pool, solver.config().locale);
        }

        let mut reported = 0;
        let solutions = solver.solve_with_progress(|done: usize, total: usize| {
            let decile = (percent(done, total) / 10.0) as u32;
            if decile > reported {
                reported = decile;
                tracing::info!("{}% of relic/epic pairs searched", decile * 10);
            }
        })?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&solutions)?);
            return Ok(());
        }
        print_solutions(&solutions, solver.config(), self.all);
        Ok(())
    }

    /// Overlays the flags that were given onto `config`.
    fn apply(&self, mut config: SolverConfig) -> SolverConfig {
        macro_rules! set {
            ($($flag:ident => $field:ident),* $(,)?) => {
                $(if let Some(value) = self.$flag.clone() {
                    config.$field = value;
                })*
            };
        }
        set! {
            level => level,
            tolerance => tolerance,
            ap => ap,
            mp => mp,
            wp => wp,
            ra => ra,
            min_crit => min_crit,
            num_mastery => num_mastery,
            elements => elements,
            count_negative_zerk => negative_berserk,
            count_negative_rear => negative_rear,
            my_base_crit => base_crit,
            my_base_mastery => base_mastery,
            my_base_crit_mastery => base_crit_mastery,
            base_ap => base_ap,
            base_mp => base_mp,
            base_range => base_ra,
            base_wp => base_wp,
            locale => locale,
            search_depth => search_depth,
            hard_cap_depth => hard_cap_depth,
        }
        if self.class.is_some() {
            config.class = self.class;
        }

        config.distance |= self.distance;
        config.melee |= self.melee;
        config.berserk |= self.berserk;
        config.rear |= self.rear;
        config.heal |= self.heal;
        config.unraveling |= self.unraveling;
        config.light_weapon_expert |= self.try_light_weapon_expert;
        config.wield_two_handed |= self.wield_two_handed;
        config.skip_two_handed |= self.skip_two_handed_weapons;
        config.dry_run |= self.dry_run;
        config.exhaustive |= self.exhaustive;
        if self.no_skip_shields {
            config.skip_shields = false;
        }

        config.forbid_names.extend(self.forbid_names.iter().cloned());
        config.forbid_ids.extend(&self.forbid_ids);
        config.force_ids.extend(&self.force_ids);
        config.force_names.extend(self.force_names.iter().cloned());
        config.forbid_rarities.extend(&self.forbid_rarities);
        if !self.allowed_rarities.is_empty() {
            config.allowed_rarities = self.allowed_rarities.clone();
        }
        config
    }

    fn load_catalog(&self, env: &CliEnv) -> Result<Catalog> {
        let path = self
            .catalog
            .clone()
            .or_else(|| env.catalog.clone())
            .unwrap_or_else(dirs::default_catalog_path);
        if !path.exists() {
            anyhow::bail!(
                "Catalog not found: {}\n\nHint: pass --catalog, set WAKGEAR_CATALOG, or run `cargo xtask pack-catalog`",
                path.display()
            );
        }
        tracing::debug!("Loading catalog from {}", path.display());
        CatalogLoader::load(&path)
            .with_context(|| format!("Failed to load catalog: {}", path.display()))
    }

    fn print_pool(&self, pool: &CandidatePool, locale: Locale) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(pool)?);
            return Ok(());
        }

        println!("{}", style("=== Candidate Pool ===").bold().green());
        println!("{} {}", style("Relics:").bold().cyan(), pool.relics.len());
        println!("{} {}", style("Epics:").bold().cyan(), pool.epics.len());
        println!("{} {}", style("Forced:").bold().cyan(), pool.forced.len());
        for (slot, items) in &pool.slots {
            println!("{} {}", style(format!("{slot}:")).bold().cyan(), items.len());
        }
        println!("{} {}", style("Weapon sets:").bold().cyan(), pool.weapons.len());
        println!();

        for item in pool.unique_items() {
            println!("  {}", item.display(locale));
        }
        Ok(())
    }
}

fn print_solutions(solutions: &[Solution], config: &SolverConfig, all: bool) {
    let Some(best) = solutions.first() else {
        println!("{}", style("No sets matching this were found!").yellow());
        return;
    };

    let shown = if all { solutions } else { std::slice::from_ref(best) };
    for (idx, solution) in shown.iter().enumerate() {
        if idx == 0 {
            println!(
                "{}",
                style(format!(
                    "Best set under constraints has effective mastery {:.2}:",
                    solution.score
                ))
                .bold()
                .green()
            );
        } else {
            println!();
            println!(
                "{}",
                style(format!("Alternative with effective mastery {:.2}:", solution.score)).bold()
            );
        }
        print!("{}", solution.description);

        match build_code_from_items(config.level, solution.catalog_items()) {
            Ok(code) => println!("{} {}", style("Wakforge code:").dim(), code),
            Err(err) => tracing::warn!("Could not build a Wakforge code: {err}"),
        }
    }
}

fn parse_elements(value: &str) -> Result<Elements, String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .try_fold(Elements::empty(), |acc, name| {
            Elements::from_name(&name.to_ascii_uppercase())
                .map(|element| acc | element)
                .ok_or_else(|| format!("unknown element {name:?} (expected fire, earth, water, air)"))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn parse(args: &[&str]) -> Solve {
        Solve::try_parse_from(std::iter::once("solve").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn flags_override_defaults() {
        let solve = parse(&[
            "--lv", "200", "--ap", "10", "--mp", "4", "--distance", "--no-skip-shields",
            "--id-force", "26494,1062", "--forbid", "Gelano", "--elements", "fire,air",
            "--class", "Xel", "--count-negative-zerk", "full", "--crit", "-5",
        ]);
        let config = solve.apply(SolverConfig::new());

        assert_eq!(config.level, 200);
        assert_eq!(config.ap, 10);
        assert_eq!(config.mp, 4);
        assert_eq!(config.min_crit, -5);
        assert!(config.distance);
        assert!(!config.skip_shields);
        assert_eq!(config.force_ids, vec![26494, 1062]);
        assert_eq!(config.forbid_names, vec!["Gelano".to_owned()]);
        assert_eq!(config.elements, Elements::FIRE | Elements::AIR);
        assert_eq!(config.class, Some(ClassName::Xelor));
        assert_eq!(config.negative_berserk, NegativePolicy::Full);
        assert_eq!(config.tolerance, SolverConfig::DEFAULT_TOLERANCE);
    }

    #[test]
    fn unset_flags_keep_file_values() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "level = 215\nmelee = true\nforbid_ids = [7]").unwrap();
        let base = ConfigLoader::load(file.path()).unwrap();

        let config = parse(&["--id-forbid", "8"]).apply(base);
        assert_eq!(config.level, 215);
        assert!(config.melee);
        assert_eq!(config.forbid_ids, vec![7, 8]);
    }

    #[test]
    fn two_handed_modes_conflict() {
        let result = Solve::try_parse_from([
            "solve",
            "--use-wield-type-2h",
            "--skip-two-handed-weapons",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn element_names_are_case_insensitive() {
        assert_eq!(parse_elements("Water, EARTH"), Ok(Elements::WATER | Elements::EARTH));
        assert!(parse_elements("wood").is_err());
    }
}
