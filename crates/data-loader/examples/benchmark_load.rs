use data_loader::{RecommendationIndex, VectorizerConfig};
use std::path::Path;
use std::time::Instant;

fn main() {
    let path = Path::new("data/movies.csv");

    println!("Loading movie dataset and fitting TF-IDF...\n");

    let start = Instant::now();
    let index = RecommendationIndex::load_from_file(path, VectorizerConfig::default())
        .expect("Failed to load dataset");
    let elapsed = start.elapsed();

    let (movies, features) = index.counts();
    let non_zero: usize = index.matrix().rows().iter().map(|r| r.len()).sum();

    println!("\n=== Load Complete ===");
    println!("Time taken: {:?}", elapsed);
    println!("Movies: {}", movies);
    println!("Vocabulary: {}", features);
    println!("Non-zero weights: {}", non_zero);
    println!("\nPerformance: {:.0} movies/second",
             movies as f64 / elapsed.as_secs_f64());
}
