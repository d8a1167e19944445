#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use neuroevo::neuroevolution::genome::Genome;
use neuroevo::neuroevolution::lineage::Lineage;
use neuroevo::{Config, ErrorKind, EvolutionError, Params, Snapshot, Topology};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn create_test_config() -> Config {
    Config::new(Params {
        topology: Topology::new(3, vec![4], 2),
        population: 12,
        ..Params::default()
    })
    .unwrap()
}

#[test]
fn test_first_generation() {
    let config = create_test_config();
    let mut rng = StdRng::seed_from_u64(1);
    let mut lineage = Lineage::new(config.layer_sizes());

    assert!(lineage.is_empty());
    assert_eq!(lineage.epoch(), None);

    let snapshots = lineage.first_generation(&config, &mut rng);

    assert_eq!(snapshots.len(), 12);
    for snapshot in &snapshots {
        assert_eq!(snapshot.shape, vec![3, 4, 2]);
        assert_eq!(snapshot.weights.len(), 3 * 4 + 4 * 2);
    }
    assert_eq!(lineage.len(), 1);
    assert_eq!(lineage.epoch(), Some(0));
    assert!(lineage.current().unwrap().is_empty());
}

#[test]
fn test_empty_lineage_errors() {
    let config = create_test_config();
    let mut rng = StdRng::seed_from_u64(1);
    let mut lineage = Lineage::new(config.layer_sizes());

    let err = lineage.next_generation(&config, &mut rng).unwrap_err();
    assert!(matches!(err, EvolutionError::NoGenerations));
    assert_eq!(err.kind(), ErrorKind::State);

    let snapshot = Snapshot::new(vec![3, 4, 2], vec![0.0; 20]).unwrap();
    let err = lineage
        .add_genome(Genome::new(1.0, snapshot).unwrap())
        .unwrap_err();
    assert!(matches!(err, EvolutionError::NoGenerations));
}

#[test]
fn test_add_genome_enforces_topology() {
    let config = create_test_config();
    let mut rng = StdRng::seed_from_u64(1);
    let mut lineage = Lineage::new(config.layer_sizes());
    lineage.first_generation(&config, &mut rng);

    let foreign = Snapshot::new(vec![2, 2, 1], vec![0.0; 6]).unwrap();
    let err = lineage
        .add_genome(Genome::new(1.0, foreign).unwrap())
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Configuration);
    assert!(lineage.current().unwrap().is_empty());
}

#[test]
fn test_next_generation_keeps_history() {
    let config = create_test_config();
    let mut rng = StdRng::seed_from_u64(4);
    let mut lineage = Lineage::new(config.layer_sizes());

    let snapshots = lineage.first_generation(&config, &mut rng);
    for (i, snapshot) in snapshots.into_iter().enumerate() {
        lineage
            .add_genome(Genome::new(i as f64, snapshot).unwrap())
            .unwrap();
    }

    let next = lineage.next_generation(&config, &mut rng).unwrap();

    assert_eq!(next.len(), 12);
    assert_eq!(lineage.len(), 2);
    assert_eq!(lineage.generations()[0].len(), 12);
    assert_eq!(lineage.generations()[0].best().unwrap().score(), 11.0);
    assert!(lineage.current().unwrap().is_empty());
}

#[test]
fn test_failed_breeding_keeps_current_generation() {
    let config = create_test_config();
    let mut rng = StdRng::seed_from_u64(4);
    let mut lineage = Lineage::new(config.layer_sizes());

    let snapshots = lineage.first_generation(&config, &mut rng);
    lineage
        .add_genome(Genome::new(3.0, snapshots[0].clone()).unwrap())
        .unwrap();

    let err = lineage.next_generation(&config, &mut rng).unwrap_err();
    assert!(matches!(err, EvolutionError::NotEnoughGenomes(1)));
    assert_eq!(lineage.len(), 1);
    assert_eq!(lineage.current().unwrap().len(), 1);
}
