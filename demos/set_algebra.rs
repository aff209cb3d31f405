use avl_index::AvlTree;

fn main() {
    env_logger::init();

    let a: AvlTree<i32> = [1, 0, 5, 4, 7, 10, 13].into_iter().collect();
    let b: AvlTree<i32> = [4, 7, 9, 10, 20, 17, 91].into_iter().collect();

    println!("a         = {:?}", a);
    println!("b         = {:?}", b);
    println!("a | b     = {:?}", a.union(&b));
    println!("a & b     = {:?}", a.intersection(&b));
    println!("a - b     = {:?}", a.difference(&b));
    println!("b - a     = {:?}", b.difference(&a));
    println!("a ^ b     = {:?}", a.symmetric_difference(&b));

    println!("\nunion shape:\n{}", a.union(&b));
}
