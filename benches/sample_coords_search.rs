use std::time::Duration;

use criterion::BenchmarkId;
use criterion::Criterion;
use criterion::criterion_group;
use criterion::criterion_main;
use hrsw::Stopwatch;
use human_duration::human_duration;
use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;

use voxel_search::algorithms::coords::coords_search;
use voxel_search::coords::Coords;
use voxel_search::node::VoxelNode;
use voxel_search::settings::Settings;
use voxel_search::terrain::examiner::TerrainExaminer;
use voxel_search::terrain::grid::VoxelGrid;

/// Maximum time willing to wait for a single benchmark instance.
/// Experiments are carried out at least 5s and at least 100 times, so running a
/// 1s instance takes 1m40s.
const MAX_INSTANCE_TIME: Duration = Duration::from_secs(1);

fn search(grid: &VoxelGrid, start: Coords, goal: Coords, settings: &Settings) -> bool {
    let examiner = TerrainExaminer::for_settings(grid, settings);
    coords_search(VoxelNode(start), VoxelNode(goal), settings, &examiner).is_resolved()
}

fn coords_search_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("Voxel Search");
    let settings = Settings::default()
        .with_range(256)
        .with_max_iterations(0);

    for side in [16, 32, 64] {
        for i in 0..5 {
            let instance_name = format!("random[{side}x{side}]:{i}");
            let mut rng = ChaCha8Rng::seed_from_u64(i);
            let grid = VoxelGrid::random(&mut rng, side, side);
            let (Some(start), Some(goal)) = (grid.landing(0, 0), grid.landing(side - 1, side - 1))
            else {
                log::warn!("Skipping {instance_name}, no place to stand on a corner");
                continue;
            };

            let mut stopwatch = Stopwatch::new_started();
            let resolved = search(&grid, start, goal, &settings);
            stopwatch.stop();
            println!("{instance_name}: {start} -> {goal} resolved: {resolved}");
            if stopwatch.elapsed() > MAX_INSTANCE_TIME {
                log::warn!(
                    "Skipping {instance_name} as it takes too long ({})",
                    human_duration(&stopwatch.elapsed())
                );
                continue;
            }

            group.bench_with_input(
                BenchmarkId::new("A*", &instance_name),
                &(start, goal),
                |b, (start, goal)| b.iter(|| search(&grid, *start, *goal, &settings)),
            );
        }
    }
    group.finish();
}

criterion_group!(benches, coords_search_bench);
criterion_main!(benches);
