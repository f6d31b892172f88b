use criterion::{black_box, criterion_group, criterion_main, Criterion};

use paintbot_solver::config::{Config, Locality};
use paintbot_solver::level::Level;
use paintbot_solver::Solve;

// allowing unused so i can bench just one or few
// and still notice other warnings if there are any
#[allow(unused)]
fn bench_open_room(c: &mut Criterion) {
    bench_level(
        c,
        "open-room",
        "(0,0),(20,0),(20,20),(0,20)#(10,10)##",
        Config::default(),
    );
}

#[allow(unused)]
fn bench_pillars(c: &mut Criterion) {
    // boosts in three corners
    bench_level(
        c,
        "pillars",
        "(0,0),(10,0),(10,10),(0,10)#(0,0)#(2,2),(4,2),(4,4),(2,4);(6,2),(8,2),(8,4),(6,4);(2,6),(4,6),(4,8),(2,8);(6,6),(8,6),(8,8),(6,8)#B(9,9);F(0,9);L(9,0)",
        Config::default(),
    );
}

#[allow(unused)]
fn bench_pillars_start_distance(c: &mut Criterion) {
    bench_level(
        c,
        "pillars-start-distance",
        "(0,0),(10,0),(10,10),(0,10)#(0,0)#(2,2),(4,2),(4,4),(2,4);(6,2),(8,2),(8,4),(6,4);(2,6),(4,6),(4,8),(2,8);(6,6),(8,6),(8,8),(6,8)#B(9,9);F(0,9);L(9,0)",
        Config {
            locality: Locality::StartDistance,
            ..Config::default()
        },
    );
}

fn bench_level(c: &mut Criterion, name: &str, descriptor: &str, config: Config) {
    let level: Level = descriptor.parse().unwrap();
    let config = Config {
        check_consistency: false,
        ..config
    };

    c.bench_function(name, move |b| {
        b.iter(|| black_box(level.solve(black_box(config))))
    });
}

criterion_group!(
    benches,
    bench_open_room,
    bench_pillars,
    //bench_pillars_start_distance,
);
criterion_main!(benches);
