use avl_index::AvlTree;

fn main() {
    env_logger::init();

    let mut tree = AvlTree::with_comparator(|a: &f64, b: &f64| a.total_cmp(b));
    for key in [1.1, 1.3, 1.5, 1.9, 2.1, 2.5, 2.7] {
        tree.insert(key);
    }
    assert_eq!(tree.get(&1.5), Some(&1.5));
    assert_eq!(tree.previous(&1.9), Some(&1.5));
    assert_eq!(tree.next(&1.9), Some(&2.1));

    if let Some(removal) = tree.remove(&1.9) {
        let start = removal.rebalanced_from.map(|node| *node.key());
        println!("removed {} (rebalanced from {:?})", removal.key, start);
    }

    println!("height: {:?}, keys: {:?}", tree.height(), tree);
    print!("{}", tree.print(|key| format!("{key:.1}")));
}
