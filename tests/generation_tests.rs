#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use neuroevo::neuroevolution::generation::{Generation, breeding_pairs, crossover, mutate};
use neuroevo::neuroevolution::genome::Genome;
use neuroevo::{Config, ErrorKind, EvolutionError, Params, ScoreSort, Snapshot, Topology};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn shape() -> Vec<usize> {
    vec![2, 2, 1]
}

fn genome(score: f64, fill: f32) -> Genome {
    let shape = shape();
    let count = Snapshot::weight_count(&shape);
    Genome::new(score, Snapshot::new(shape, vec![fill; count]).unwrap()).unwrap()
}

fn random_genome(score: f64, rng: &mut StdRng) -> Genome {
    let shape = shape();
    let weights = (0..Snapshot::weight_count(&shape))
        .map(|_| rng.random_range(-1.0..=1.0))
        .collect();
    Genome::new(score, Snapshot::new(shape, weights).unwrap()).unwrap()
}

fn config(population: usize, elitism: f64, random_behaviour: f64, mutation_rate: f64) -> Config {
    Config::new(Params {
        topology: Topology::new(2, vec![2], 1),
        population,
        elitism,
        random_behaviour,
        mutation_rate,
        ..Params::default()
    })
    .unwrap()
}

fn scores(generation: &Generation) -> Vec<f64> {
    generation.genomes().iter().map(Genome::score).collect()
}

#[test]
fn test_add_genome_descending_order() {
    let mut generation = Generation::new(ScoreSort::Descending);
    for score in [3.0, 10.0, 1.0, 7.0, 7.0, -2.0, 12.0] {
        generation.add_genome(genome(score, 0.0));
    }

    assert_eq!(scores(&generation), vec![12.0, 10.0, 7.0, 7.0, 3.0, 1.0, -2.0]);
    assert_eq!(generation.best().unwrap().score(), 12.0);
}

#[test]
fn test_add_genome_ascending_order() {
    let mut generation = Generation::new(ScoreSort::Ascending);
    for score in [3.0, 10.0, 1.0, 7.0, -2.0] {
        generation.add_genome(genome(score, 0.0));
    }

    assert_eq!(scores(&generation), vec![-2.0, 1.0, 3.0, 7.0, 10.0]);
}

#[test]
fn test_ranking_invariant_random_scores() {
    let mut rng = StdRng::seed_from_u64(42);
    for sort in [ScoreSort::Descending, ScoreSort::Ascending] {
        let mut generation = Generation::new(sort);
        for _ in 0..200 {
            let score = f64::from(rng.random_range(-50..50));
            generation.add_genome(genome(score, 0.0));
        }
        let ranked = scores(&generation);
        assert_eq!(ranked.len(), 200);
        for pair in ranked.windows(2) {
            match sort {
                ScoreSort::Descending => assert!(pair[0] >= pair[1]),
                ScoreSort::Ascending => assert!(pair[0] <= pair[1]),
            }
        }
    }
}

#[test]
fn test_equal_scores_keep_arrival_order() {
    let mut generation = Generation::new(ScoreSort::Descending);
    generation.add_genome(genome(5.0, 1.0));
    generation.add_genome(genome(9.0, 0.0));
    generation.add_genome(genome(5.0, 2.0));
    generation.add_genome(genome(5.0, 3.0));

    let fills: Vec<f32> = generation
        .genomes()
        .iter()
        .map(|g| g.snapshot().weights[0])
        .collect();
    assert_eq!(fills, vec![0.0, 1.0, 2.0, 3.0]);
}

#[test]
fn test_nan_score_is_rejected() {
    let snapshot = Snapshot::new(shape(), vec![0.0; 6]).unwrap();
    let err = Genome::new(f64::NAN, snapshot).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::State);
}

#[test]
fn test_crossover_containment() {
    let mut rng = StdRng::seed_from_u64(9);
    let a = random_genome(1.0, &mut rng);
    let b = random_genome(0.0, &mut rng);

    let mut from_a = 0;
    let mut from_b = 0;
    for _ in 0..50 {
        let child = crossover(a.snapshot(), b.snapshot(), &mut rng);
        assert_eq!(child.shape, a.snapshot().shape);
        for (i, &w) in child.weights.iter().enumerate() {
            let wa = a.snapshot().weights[i];
            let wb = b.snapshot().weights[i];
            assert!(w == wa || w == wb);
            if w == wa {
                from_a += 1;
            } else {
                from_b += 1;
            }
        }
    }
    // 300 coin flips: both parents contribute.
    assert!(from_a > 0 && from_b > 0);
}

#[test]
fn test_mutation_bounds() {
    let mut rng = StdRng::seed_from_u64(5);
    let mut snapshot = Snapshot::new(shape(), vec![0.0; 6]).unwrap();

    mutate(&mut snapshot, 0.0, 0.5, &mut rng);
    assert!(snapshot.weights.iter().all(|&w| w == 0.0));

    mutate(&mut snapshot, 1.0, 0.5, &mut rng);
    assert!(snapshot.weights.iter().all(|&w| (-0.5..=0.5).contains(&w)));
}

#[test]
fn test_breed_child_count_and_shape() {
    let mut rng = StdRng::seed_from_u64(1);
    let params = config(10, 0.2, 0.2, 0.1).params;
    let children = Generation::breed(&genome(2.0, 1.0), &genome(1.0, -1.0), 3, &params, &mut rng)
        .unwrap();

    assert_eq!(children.len(), 3);
    for child in &children {
        assert_eq!(child.shape, shape());
        assert!(child.validate().is_ok());
    }
}

#[test]
fn test_breed_rejects_mismatched_parents() {
    let mut rng = StdRng::seed_from_u64(1);
    let params = Params::default();
    let other = Genome::new(1.0, Snapshot::new(vec![1, 1, 1], vec![0.5, 0.5]).unwrap()).unwrap();

    let err = Generation::breed(&genome(2.0, 1.0), &other, 1, &params, &mut rng).unwrap_err();
    assert!(matches!(err, EvolutionError::TopologyMismatch { .. }));
}

#[test]
fn test_next_generation_scenario() {
    let mut rng = StdRng::seed_from_u64(3);
    let config = config(4, 0.5, 0.0, 0.0);

    let mut rng_weights = StdRng::seed_from_u64(99);
    let best = random_genome(10.0, &mut rng_weights);
    let second = random_genome(5.0, &mut rng_weights);

    let mut generation = Generation::new(ScoreSort::Descending);
    generation.add_genome(second.clone());
    generation.add_genome(best.clone());

    let next = generation.generate_next(&config, &mut rng).unwrap();

    assert_eq!(next.len(), 4);
    assert_eq!(&next[0], best.snapshot());
    assert_eq!(&next[1], second.snapshot());
    for child in &next[2..] {
        for (i, &w) in child.weights.iter().enumerate() {
            assert!(w == best.snapshot().weights[i] || w == second.snapshot().weights[i]);
        }
    }
}

#[test]
fn test_next_generation_population_size() {
    let mut rng = StdRng::seed_from_u64(17);
    for (population, genomes, elitism, random_behaviour) in [
        (100, 100, 0.2, 0.2),
        (50, 2, 0.2, 0.2),
        (7, 3, 0.0, 0.0),
        (10, 10, 1.0, 0.0),
        (10, 4, 0.0, 1.0),
        (33, 5, 0.5, 0.1),
    ] {
        let config = config(population, elitism, random_behaviour, 0.1);
        let mut generation = Generation::new(ScoreSort::Descending);
        for i in 0..genomes {
            generation.add_genome(random_genome(i as f64, &mut rng));
        }

        let next = generation.generate_next(&config, &mut rng).unwrap();
        assert_eq!(next.len(), population);
        assert!(next.iter().all(|s| s.validate().is_ok()));
    }
}

#[test]
fn test_multiple_children_per_pair() {
    let mut rng = StdRng::seed_from_u64(8);
    let mut config = config(9, 0.0, 0.0, 0.0);
    config.params.children_per_pair = 4;

    let mut generation = Generation::new(ScoreSort::Descending);
    generation.add_genome(genome(2.0, 1.0));
    generation.add_genome(genome(1.0, -1.0));

    let next = generation.generate_next(&config, &mut rng).unwrap();
    assert_eq!(next.len(), 9);
    assert!(next
        .iter()
        .flat_map(|s| &s.weights)
        .all(|&w| w == 1.0 || w == -1.0));
}

#[test]
fn test_elites_are_top_ranked_and_unchanged() {
    let mut rng = StdRng::seed_from_u64(21);
    let config = config(20, 0.25, 0.25, 1.0);

    let mut generation = Generation::new(ScoreSort::Descending);
    for i in 0..8 {
        generation.add_genome(random_genome(f64::from(i), &mut rng));
    }

    let next = generation.generate_next(&config, &mut rng).unwrap();
    let elites = config.params.elite_count();
    assert_eq!(elites, 5);
    for (snapshot, ranked) in next.iter().zip(generation.genomes()).take(elites) {
        assert_eq!(snapshot, ranked.snapshot());
    }
}

#[test]
fn test_fresh_random_snapshots_use_weight_init() {
    let mut rng = StdRng::seed_from_u64(2);
    let config = config(10, 0.0, 0.5, 0.0)
        .with_weight_init(neuroevo::WeightInit::constant(0.75));

    let mut generation = Generation::new(ScoreSort::Descending);
    generation.add_genome(genome(1.0, 0.1));
    generation.add_genome(genome(0.0, 0.2));

    let next = generation.generate_next(&config, &mut rng).unwrap();
    for fresh in &next[..5] {
        assert_eq!(fresh.shape, shape());
        assert!(fresh.weights.iter().all(|&w| w == 0.75));
    }
}

#[test]
fn test_next_generation_needs_two_genomes() {
    let mut rng = StdRng::seed_from_u64(0);
    let config = config(10, 0.2, 0.2, 0.1);

    let mut generation = Generation::new(ScoreSort::Descending);
    let err = generation.generate_next(&config, &mut rng).unwrap_err();
    assert!(matches!(err, EvolutionError::NotEnoughGenomes(0)));

    generation.add_genome(genome(1.0, 0.0));
    let err = generation.generate_next(&config, &mut rng).unwrap_err();
    assert!(matches!(err, EvolutionError::NotEnoughGenomes(1)));
    assert_eq!(err.kind(), ErrorKind::State);
}

#[test]
fn test_breeding_pair_sequence() {
    let pairs = |count: usize, n: usize| breeding_pairs(count).take(n).collect::<Vec<_>>();

    assert_eq!(pairs(2, 3), vec![(0, 1), (0, 1), (0, 1)]);
    assert_eq!(pairs(3, 3), vec![(0, 1), (0, 1), (0, 1)]);
    assert_eq!(
        pairs(4, 6),
        vec![(0, 1), (0, 2), (1, 2), (0, 1), (0, 2), (1, 2)]
    );
    assert_eq!(
        pairs(5, 7),
        vec![(0, 1), (0, 2), (1, 2), (0, 3), (1, 3), (2, 3), (0, 1)]
    );
}

#[test]
fn test_lowest_ranked_genome_never_breeds() {
    let mut rng = StdRng::seed_from_u64(13);
    let config = config(6, 0.0, 0.0, 0.0);

    let mut generation = Generation::new(ScoreSort::Descending);
    generation.add_genome(genome(3.0, 10.0));
    generation.add_genome(genome(2.0, 20.0));
    generation.add_genome(genome(1.0, 30.0));

    let next = generation.generate_next(&config, &mut rng).unwrap();

    assert_eq!(next.len(), 6);
    assert!(next
        .iter()
        .flat_map(|s| &s.weights)
        .all(|&w| w == 10.0 || w == 20.0));
}
