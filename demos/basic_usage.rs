//! Basic usage of veb-set: typed sets, navigation and mixed-tag ordering.

use veb_set::{OrderedSet, Tag, TagSet, UniverseNode, Value};

fn main() -> veb_set::Result<()> {
    println!("=== veb-set - Basic Usage Example ===\n");

    // A raw universe of 2^16 unsigned keys
    let mut node = UniverseNode::new(1 << 16)?;
    for key in [100, 200, 150, 300] {
        node.insert(key)?;
    }
    println!("UniverseNode of size {}:", node.size());
    println!("  contains(150): {}", node.contains(150)?);
    println!("  successor(175): {:?}", node.successor(175)?);
    println!("  predecessor(175): {:?}", node.predecessor(175)?);
    println!("  range(100..200): {:?}", node.range(100..200).collect::<Vec<_>>());

    // Typed set over i32
    println!("\n=== i32 set ===\n");
    let mut ints = OrderedSet::with_tag(Tag::I32);
    for v in [-40, 7, 0, -3, 12] {
        ints.insert(v)?;
    }
    println!("  len: {}", ints.len());
    println!("  min: {:?}  max: {:?}", ints.min(), ints.max());
    println!("  successor(0): {:?}", ints.successor(0)?);
    println!("  predecessor(-3): {:?}", ints.predecessor(-3)?);
    print!("  values:");
    for v in &ints {
        print!(" {v}");
    }
    println!();

    ints.remove(7)?;
    println!("  after remove(7): contains(7) = {}", ints.contains(7)?);

    // Rejects values of other tags
    match ints.insert(1.5f64) {
        Err(err) => println!("  insert(1.5f64): {err}"),
        Ok(_) => unreachable!(),
    }

    // All tags share one numeric order
    println!("\n=== mixed tags ===\n");
    let mut mixed = OrderedSet::new(0, TagSet::ALL)?;
    mixed.insert(10)?;
    mixed.insert(10.5f32)?;
    mixed.insert(10.25f64)?;
    mixed.insert(5)?;
    mixed.insert(5.5f32)?;
    mixed.insert(15.75f64)?;
    println!("  universe: 2^{}", mixed.universe_size().trailing_zeros());
    println!("  sorted: {:?}", mixed.iter().collect::<Vec<Value>>());
    println!("  successor(10.25): {:?}", mixed.successor(10.25)?);
    println!("  predecessor(10.5f32): {:?}", mixed.predecessor(10.5f32)?);
    println!("  range(5.0..=10.25): {:?}", mixed.range(5.0..=10.25)?.collect::<Vec<_>>());

    println!("\n=== Example Complete ===");
    Ok(())
}
