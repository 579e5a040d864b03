//! Runs the fixed spell scenarios and prints `Test N: true/false` per check.
//!
//! Set `RUST_LOG=spell_index=trace` to watch rotations and probes.

use spell_index::{CategoryIndex, DoubleHashTable, IndexConfig, Result, SimpleSpell, Spell, SpellTree};
use tracing_subscriber::EnvFilter;

fn report(ok: bool, n: usize) {
    println!("Test {n}: {ok}");
}

fn double_hash_table() -> Result<()> {
    println!("\n--- Testing DoubleHashTable ---");
    let mut table = DoubleHashTable::with_capacity(5)?;

    let t1 = table.put(SimpleSpell::new("fire", "burn")).is_ok() && table.len() == 1;
    report(t1, 1);

    let found = table.lookup("fire");
    report(found.words == Some("burn") && found.probes == 0, 2);

    let t3 = table.put(SimpleSpell::new("ice", "freeze")).is_ok() && table.len() == 2;
    report(t3, 3);

    report(table.get("nope").is_none(), 4);

    let t5 = table.put(SimpleSpell::new("fire", "different")).is_ok() && table.len() == 3;
    report(t5, 5);
    Ok(())
}

fn spell_tree() {
    println!("\n--- Testing SpellTree ---");
    let mut tree = SpellTree::new(Spell::new("B", "fire", 20, "a2"));
    report(tree.len() == 1 && tree.height() == 0, 6);

    tree.insert(Spell::new("C", "fire", 30, "a3"));
    tree.insert(Spell::new("A", "fire", 10, "a1"));
    report(tree.len() == 3 && tree.height() <= 3, 7);

    report(tree.search("B", 20).is_some_and(|s| s.name() == "B"), 8);
    report(tree.top_k(5).len() == 3, 9);
    report(tree.top_k(3).first().is_some_and(|s| s.power_level() == 30), 10);
}

fn category_index(config: &IndexConfig) -> Result<()> {
    println!("\n--- Testing CategoryIndex ---");
    let mut index = CategoryIndex::with_config(config)?;

    index.add_record(Spell::new("A", "fire", 10, "say1"));
    report(index.count_in_category("fire") == 1, 11);

    index.add_record(Spell::new("B", "fire", 20, "say2"));
    report(index.count_in_category("fire") == 2, 12);

    let found = index.search("fire", "B", 20);
    report(found.is_some_and(|s| s.name() == "B"), 13);

    report(index.top_k("wind", 3).is_none(), 14);

    index.add_record(Spell::new("C", "ice", 15, "say3"));
    report(
        index.count_in_category("ice") == 1 && index.count_all() == 3,
        15,
    );

    for tree in index.categories() {
        for spell in tree.iter_desc() {
            println!("  {spell}");
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();

    let config = IndexConfig {
        bucket_count: 5,
        ..IndexConfig::default()
    };
    config.validate()?;

    double_hash_table()?;
    spell_tree();
    category_index(&config)?;
    Ok(())
}
