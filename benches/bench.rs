use cutstock::SolverConfig;
use cutstock::bnb;
use cutstock::instance::{Instance, Sheet};

fn main() {
    divan::main();
}

fn small_instance() -> Instance {
    Instance::new(Sheet { length: 100, width: 60 }, vec![(50, 30, 4), (40, 20, 3)]).unwrap()
}

fn medium_instance() -> Instance {
    Instance::new(
        Sheet { length: 137, width: 97 },
        vec![(61, 47, 9), (53, 31, 11), (29, 19, 13), (17, 11, 17), (41, 23, 6)],
    )
    .unwrap()
}

#[divan::bench]
fn small() {
    let instance = divan::black_box(small_instance());
    bnb::solve(&instance, &SolverConfig::default()).unwrap();
}

#[divan::bench]
fn medium() {
    let instance = divan::black_box(medium_instance());
    bnb::solve(&instance, &SolverConfig::default()).unwrap();
}
