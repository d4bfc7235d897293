use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use env_logger::Env;
use log::info;

use hoplabel::algorithms::analysis::{average_clustering_coefficient, local_clustering_coefficient};
use hoplabel::algorithms::landmark::{build_label_index, LabelConfig, LabelIndex};
use hoplabel::algorithms::path::{DistanceAnswer, DistanceOracle};
use hoplabel::algorithms::triangle::{count_triangles, TriangleConfig, TriangleCounts};
use hoplabel::config::{DEFAULT_EDGE_PATTERN, DEFAULT_SPLIT_PATTERN, DEFAULT_THREAD_NUM};
use hoplabel::persistence::{
    export_label_index, export_triangle_counts, import_label_index, import_triangle_counts,
};
use hoplabel::plan::{pair_queries, RunPlan};
use hoplabel::{EdgeListGraph, GraphQuery};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {

    /// The file that contains the graph
    #[arg(value_name = "INPUT_FILE")]
    input_file: PathBuf,

    /// Pattern a line has to match to be parsed as an edge.
    #[arg(long, default_value = DEFAULT_EDGE_PATTERN)]
    pattern: String,

    /// Pattern separating the two vertices of an edge line.
    #[arg(long, default_value = DEFAULT_SPLIT_PATTERN)]
    split: String,

    /// Import labeled landmarks from a JSON file.
    #[arg(long, value_name = "FILE")]
    fromfile: Option<PathBuf>,

    /// Dump the labeled landmarks into a JSON file.
    #[arg(long, value_name = "FILE")]
    save: Option<PathBuf>,

    /// Label every reachable vertex from every landmark.
    #[arg(long)]
    no_pruning: bool,

    /// Shortest path query between two vertices, repeatable.
    #[arg(long, num_args = 2, value_names = ["FROM", "TO"])]
    shortest_path: Vec<String>,

    /// Import triangle counts from a JSON file.
    #[arg(long, value_name = "FILE")]
    triangles_fromfile: Option<PathBuf>,

    /// Dump the triangle counts into a JSON file.
    #[arg(long, value_name = "FILE")]
    triangles_save: Option<PathBuf>,

    /// Local clustering coefficient query for a vertex, repeatable.
    #[arg(long, value_name = "VERTEX")]
    clustering: Vec<String>,

    /// Report the average local clustering coefficient.
    #[arg(long)]
    average_clustering: bool,

    /// Threads for the heavy-vertex triangle phase.
    #[arg(short = 'n', long, default_value_t = DEFAULT_THREAD_NUM)]
    num_threads: usize,

    /// Hide progress bars.
    #[arg(long)]
    no_progress: bool,
}

impl Args {
    fn plan(&self) -> RunPlan {
        RunPlan {
            shortest_paths: pair_queries(&self.shortest_path),
            clustering: self.clustering.clone(),
            average_clustering: self.average_clustering,
            import_labels: self.fromfile.is_some(),
            save_labels: self.save.is_some(),
            import_triangles: self.triangles_fromfile.is_some(),
            save_triangles: self.triangles_save.is_some(),
        }
    }
}

fn label_index(args: &Args, graph: &EdgeListGraph) -> anyhow::Result<LabelIndex> {
    let index = match &args.fromfile {
        Some(path) => {
            info!("importing labeled landmarks from '{}'...", path.display());
            import_label_index(path)?
        }
        None => {
            info!("creating landmark labels...");
            let start = Instant::now();
            let label_config = LabelConfig {
                pruning: !args.no_pruning,
                show_progress: !args.no_progress,
            };
            let index = build_label_index(graph, label_config);
            info!("Landmark Labeling Elapsed Time: {:?} us", start.elapsed().as_micros());
            index
        }
    };

    let stats = index.stats();
    info!(
        "label index: {} vertices, {} entries, {:.2} avg / {} max per vertex",
        stats.vertex_count, stats.total_entries, stats.average_label_size, stats.max_label_size
    );

    if let Some(path) = &args.save {
        info!("exporting labeled landmarks to '{}'...", path.display());
        export_label_index(path, &index)?;
    }
    Ok(index)
}

fn triangle_counts(args: &Args, graph: &EdgeListGraph) -> anyhow::Result<TriangleCounts> {
    let trias = match &args.triangles_fromfile {
        Some(path) => {
            info!("importing triangle counts from '{}'...", path.display());
            import_triangle_counts(path)?
        }
        None => {
            info!("counting triangles...");
            let start = Instant::now();
            let triangle_config = TriangleConfig {
                thread_num: args.num_threads,
                show_progress: !args.no_progress,
            };
            let trias = count_triangles(graph, triangle_config);
            info!("Triangle Counting Elapsed Time: {:?} us", start.elapsed().as_micros());
            trias
        }
    };
    info!("graph contains {} triangles", trias.total_triangles());

    if let Some(path) = &args.triangles_save {
        info!("exporting triangle counts to '{}'...", path.display());
        export_triangle_counts(path, &trias)?;
    }
    Ok(trias)
}

fn display_vertex(graph: &EdgeListGraph, vertex_id: usize) -> String {
    graph
        .label_of(vertex_id)
        .map(str::to_owned)
        .unwrap_or_else(|| vertex_id.to_string())
}

fn display_coefficient(coefficient: f64) -> String {
    if coefficient.is_nan() {
        "undefined".to_owned()
    } else {
        format!("{:.6}", coefficient)
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let args: Args = Args::parse();
    let plan = args.plan();

    // Step 1: Load the graph from the edge list
    info!("reading file '{}'...", args.input_file.display());
    let graph = EdgeListGraph::from_edge_file(&args.input_file, &args.pattern, &args.split)
        .with_context(|| format!("failed to load graph '{}'", args.input_file.display()))?;
    info!(
        "created graph with {} vertices and {} edges",
        graph.vertex_count(),
        graph.edge_count()
    );

    // Step 2: Distance queries over the landmark labels
    if plan.needs_label_index() {
        let index = label_index(&args, &graph)?;
        let oracle = DistanceOracle::new(&index);
        for (source, destination) in &plan.shortest_paths {
            match oracle.query_by_label(&graph, source, destination)? {
                DistanceAnswer::Reachable { distance, via } => println!(
                    "shortest path {} -> {}: {} (via {})",
                    source, destination, distance, display_vertex(&graph, via)
                ),
                DistanceAnswer::Unreachable => println!(
                    "shortest path {} -> {}: inf (via (none))",
                    source, destination
                ),
            }
        }
    }

    // Step 3: Clustering queries over the triangle counts
    if plan.needs_triangle_counts() {
        let trias = triangle_counts(&args, &graph)?;
        for vertex in &plan.clustering {
            let coefficient = local_clustering_coefficient(&graph, vertex, &trias)?;
            println!("clustering coefficient of {}: {}", vertex, display_coefficient(coefficient));
        }
        if plan.average_clustering {
            println!(
                "average clustering coefficient: {}",
                display_coefficient(average_clustering_coefficient(&graph, &trias))
            );
        }
    }

    Ok(())
}
