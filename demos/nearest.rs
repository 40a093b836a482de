use kdknn::{KdTree, PointSet};

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    // Scatter points through a 100x100x100 box.
    let points = PointSet::random(10_000, 3, 0.0, 100.0);

    // Leaves hold at most 8 points, and each query returns 8 neighbours.
    let tree = match KdTree::from_point_set(points, 8) {
        Ok(tree) => tree,
        Err(e) => {
            eprintln!("failed to build tree: {}", e);
            return;
        }
    };
    println!(
        "Built tree over {} points: depth {}, {} leaves",
        tree.len(),
        tree.depth(),
        tree.leaf_count()
    );

    let query = [50.0, 50.0, 50.0];
    match tree.knn_with_distances(&query) {
        Ok(neighbors) => {
            println!("Approximate neighbours of {:?}:", query);
            for n in neighbors {
                println!("  {:?}, distance={:.3}", n.point.coords(), n.distance);
            }
        }
        Err(e) => eprintln!("knn failed: {}", e),
    }

    match tree.z_average(&query) {
        Ok(avg) => println!("Average z in the query's leaf: {:.3}", avg),
        Err(e) => eprintln!("average failed: {}", e),
    }
}
