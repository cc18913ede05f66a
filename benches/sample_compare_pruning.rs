use criterion::BenchmarkId;
use criterion::Criterion;
use criterion::criterion_group;
use criterion::criterion_main;
use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;

use voxel_search::algorithms::coords::CoordsSearch;
use voxel_search::context::Context;
use voxel_search::node::VoxelNode;
use voxel_search::settings::Settings;
use voxel_search::terrain::examiner::TerrainExaminer;
use voxel_search::terrain::grid::VoxelGrid;

fn run(
    algorithm: CoordsSearch,
    grid: &VoxelGrid,
    settings: &Settings,
    start: VoxelNode,
    goal: VoxelNode,
) -> usize {
    let examiner = TerrainExaminer::for_settings(grid, settings);
    Context::new(algorithm, start, goal, settings, &examiner)
        .run()
        .opened
}

fn compare_pruning(c: &mut Criterion) {
    let mut group = c.benchmark_group("Column pruning");

    for drop in [1, 3, 8] {
        let settings = Settings::default()
            .with_range(128)
            .with_max_iterations(0)
            .with_max_drop_height(drop);

        for i in 0..3 {
            let instance_name = format!("random[48x48]:{i}/drop:{drop}");
            let mut rng = ChaCha8Rng::seed_from_u64(i);
            let grid = VoxelGrid::random(&mut rng, 48, 48);
            let (Some(start), Some(goal)) = (grid.landing(0, 0), grid.landing(47, 47)) else {
                continue;
            };
            let (start, goal) = (VoxelNode(start), VoxelNode(goal));

            group.bench_with_input(
                BenchmarkId::new("Pruned", &instance_name),
                &grid,
                |b, g| b.iter(|| run(CoordsSearch::new(), g, &settings, start, goal)),
            );
            group.bench_with_input(
                BenchmarkId::new("Naive", &instance_name),
                &grid,
                |b, g| {
                    b.iter(|| {
                        run(
                            CoordsSearch::without_column_pruning(),
                            g,
                            &settings,
                            start,
                            goal,
                        )
                    })
                },
            );
        }
    }
    group.finish();
}

criterion_group!(benches, compare_pruning);
criterion_main!(benches);
