//! Unit tests for the set covering operators.

use coverage_ga::coverage::CoverageModel;
use coverage_ga::lscp::chromosome::LscpChromosome;
use coverage_ga::lscp::genetic::{Genetic, MutationSchedule};
use coverage_ga::lscp::population::LscpPopulation;
use coverage_ga::lscp::repair::Repair;
use coverage_ga::problem::{Point, ProblemInstance};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// A 6x6 grid, 10 apart; each point covers its 8-neighbourhood.
fn create_test_problem() -> ProblemInstance {
    let mut sites = Vec::new();
    for i in 0..6 {
        for j in 0..6 {
            let id = i * 6 + j;
            sites.push((i as f64 * 10.0, j as f64 * 10.0, (id % 3) as u64 + 1));
        }
    }
    ProblemInstance::from_coordinates(15.0, 4, &sites)
}

/// Facility 0 covers everything at weight 1, the rest only themselves.
fn create_hub_problem() -> ProblemInstance {
    let mut points = vec![Point::new(0, 0.0, 0.0, 1, (0..5).collect())];
    for id in 1..5 {
        points.push(Point::new(id, id as f64, 0.0, id as u64 + 1, vec![id]));
    }
    ProblemInstance::new(1.0, 1, points)
}

fn random_genes(n: usize, rng: &mut ChaCha8Rng) -> Vec<bool> {
    (0..n).map(|_| rng.gen_bool(0.2)).collect()
}

#[test]
fn test_mutation_schedule_is_logistic() {
    let schedule = MutationSchedule::new(10.0, 500.0, 0.5);

    assert!(schedule.rate(0) < 5.0);
    assert!((schedule.rate(500) - 5.0).abs() < 1e-9);
    assert!(schedule.rate(100_000) > 9.999);
    assert!(schedule.rate(100_000) <= 10.0);

    let mut previous = schedule.rate(0);
    for t in 1..2000 {
        let current = schedule.rate(t);
        assert!(current >= previous, "m(t) decreased at t = {}", t);
        previous = current;
    }

    assert_eq!(schedule.count(0), schedule.rate(0).floor() as usize);
    assert_eq!(schedule.count(500), 5);
    assert_eq!(schedule.count(100_000), 10);
}

#[test]
fn test_construct_feasible_covers_everything() {
    let problem = create_test_problem();
    let model = CoverageModel::new(&problem).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(1);

    for _ in 0..50 {
        let chromosome = LscpPopulation::construct_feasible(&model, &mut rng);
        assert!(chromosome.is_feasible(&model));
        assert_eq!(
            chromosome.fitness(),
            model.total_weight(chromosome.selected())
        );
    }
}

#[test]
fn test_construct_feasible_is_irredundant() {
    let problem = create_test_problem();
    let model = CoverageModel::new(&problem).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(2);

    let chromosome = LscpPopulation::construct_feasible(&model, &mut rng);
    let counts = Repair::coverage_counts(chromosome.genes(), &model);

    for facility in chromosome.selected() {
        assert!(
            model.coverage_of(facility).iter().any(|&p| counts[p] < 2),
            "facility {} is redundant",
            facility
        );
    }
}

#[test]
fn test_crossover_keeps_agreeing_loci() {
    let genetic = Genetic;
    let problem = create_test_problem();
    let model = CoverageModel::new(&problem).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(3);

    for _ in 0..20 {
        let parent1 = LscpChromosome::new(random_genes(36, &mut rng), &model);
        let parent2 = LscpChromosome::new(random_genes(36, &mut rng), &model);
        let child = genetic.crossover(&parent1, &parent2, &mut rng);

        assert_eq!(child.len(), 36);
        for i in 0..36 {
            if parent1.genes()[i] == parent2.genes()[i] {
                assert_eq!(child[i], parent1.genes()[i]);
            } else {
                assert!(child[i] == parent1.genes()[i] || child[i] == parent2.genes()[i]);
            }
        }
    }
}

/// Two isolated points with weights 1 and 9.
fn create_two_weight_model() -> CoverageModel {
    let points = vec![
        Point::new(0, 0.0, 0.0, 1, vec![0]),
        Point::new(1, 10.0, 0.0, 9, vec![1]),
    ];
    CoverageModel::new(&ProblemInstance::new(1.0, 1, points)).unwrap()
}

#[test]
fn test_crossover_favors_the_lighter_parent() {
    let genetic = Genetic;
    let model = create_two_weight_model();
    let mut rng = ChaCha8Rng::seed_from_u64(8);

    let light = LscpChromosome::new(vec![true, false], &model);
    let heavy = LscpChromosome::new(vec![false, true], &model);
    assert_eq!((light.fitness(), heavy.fitness()), (1, 9));

    // The first parent's allele is kept with probability 9 / (1 + 9).
    let trials = 5000;
    let mut from_light = 0;
    for _ in 0..trials {
        let child = genetic.crossover(&light, &heavy, &mut rng);
        from_light += child
            .iter()
            .zip(light.genes())
            .filter(|(a, b)| a == b)
            .count();
    }
    let share = from_light as f64 / (2 * trials) as f64;
    assert!((share - 0.9).abs() < 0.02, "share = {}", share);

    // Swapping the parents swaps the bias.
    let mut from_heavy = 0;
    for _ in 0..trials {
        let child = genetic.crossover(&heavy, &light, &mut rng);
        from_heavy += child
            .iter()
            .zip(heavy.genes())
            .filter(|(a, b)| a == b)
            .count();
    }
    let share = from_heavy as f64 / (2 * trials) as f64;
    assert!((share - 0.1).abs() < 0.02, "share = {}", share);
}

#[test]
fn test_crossover_of_empty_selections_does_not_divide_by_zero() {
    let genetic = Genetic;
    let model = create_two_weight_model();
    let mut rng = ChaCha8Rng::seed_from_u64(9);

    let empty = LscpChromosome::new(vec![false, false], &model);
    assert_eq!(empty.fitness(), 0);
    let child = genetic.crossover(&empty, &empty.clone(), &mut rng);
    assert_eq!(child, vec![false, false]);
}

#[test]
fn test_crossover_of_identical_parents_is_a_copy() {
    let genetic = Genetic;
    let problem = create_test_problem();
    let model = CoverageModel::new(&problem).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(4);

    let parent = LscpPopulation::construct_feasible(&model, &mut rng);
    let child = genetic.crossover(&parent, &parent.clone(), &mut rng);
    assert_eq!(child, parent.genes());
}

#[test]
fn test_elite_pool_picks_cheapest_covering_facilities() {
    let genetic = Genetic;
    let problem = create_hub_problem();
    let model = CoverageModel::new(&problem).unwrap();

    assert_eq!(genetic.elite_pool(&model, 1), vec![0]);
    assert_eq!(genetic.elite_pool(&model, 2), vec![0, 1, 2, 3, 4]);
    assert!(genetic.elite_pool(&model, 0).is_empty());
}

#[test]
fn test_mutate_flips_distinct_pool_loci() {
    let genetic = Genetic;
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let pool = vec![1, 4, 7, 9];
    let mut genes = vec![false; 10];

    let flipped = genetic.mutate(&mut genes, &pool, 3, &mut rng);

    assert_eq!(flipped, 3);
    assert_eq!(genes.iter().filter(|&&g| g).count(), 3);
    for (i, &gene) in genes.iter().enumerate() {
        if gene {
            assert!(pool.contains(&i));
        }
    }
}

#[test]
fn test_mutate_is_clamped_to_pool() {
    let genetic = Genetic;
    let mut rng = ChaCha8Rng::seed_from_u64(6);
    let mut genes = vec![true; 5];

    assert_eq!(genetic.mutate(&mut genes, &[0, 2], 10, &mut rng), 2);
    assert_eq!(genes, vec![false, true, false, true, true]);

    assert_eq!(genetic.mutate(&mut genes, &[], 10, &mut rng), 0);
    assert_eq!(genes, vec![false, true, false, true, true]);
}

#[test]
fn test_repair_restores_feasibility() {
    let problem = create_test_problem();
    let model = CoverageModel::new(&problem).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(7);

    for _ in 0..50 {
        let mut genes = random_genes(36, &mut rng);
        Repair::repair(&mut genes, &model);
        assert!(LscpChromosome::new(genes, &model).is_feasible(&model));
    }

    let mut empty = vec![false; 36];
    Repair::repair(&mut empty, &model);
    assert!(LscpChromosome::new(empty, &model).is_feasible(&model));
}

#[test]
fn test_repair_trims_redundant_facilities() {
    let problem = create_test_problem();
    let model = CoverageModel::new(&problem).unwrap();

    let mut genes = vec![true; 36];
    Repair::repair(&mut genes, &model);

    let chromosome = LscpChromosome::new(genes, &model);
    assert!(chromosome.is_feasible(&model));
    assert!(chromosome.selected().len() < 36);

    let counts = Repair::coverage_counts(chromosome.genes(), &model);
    for facility in chromosome.selected() {
        assert!(model.coverage_of(facility).iter().any(|&p| counts[p] < 2));
    }
}

#[test]
fn test_repair_selects_the_hub() {
    let problem = create_hub_problem();
    let model = CoverageModel::new(&problem).unwrap();

    let mut genes = vec![false; 5];
    Repair::repair(&mut genes, &model);
    assert_eq!(genes, vec![true, false, false, false, false]);

    // Leaves and a missing point 4: the hub is the cheapest ratio and
    // makes every leaf redundant.
    let mut genes = vec![false, true, true, true, false];
    Repair::repair(&mut genes, &model);
    assert_eq!(genes, vec![true, false, false, false, false]);
}

#[test]
fn test_repair_leaves_irredundant_cover_alone() {
    let problem = create_hub_problem();
    let model = CoverageModel::new(&problem).unwrap();

    let mut genes = vec![true, false, false, false, false];
    Repair::repair(&mut genes, &model);
    assert_eq!(genes, vec![true, false, false, false, false]);
}

#[test]
fn test_replacement_overwrites_worse_than_average() {
    let problem = create_hub_problem();
    let model = CoverageModel::new(&problem).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(8);

    let mut population = LscpPopulation {
        individuals: vec![
            LscpChromosome::from_selection(&[0], &model),
            LscpChromosome::from_selection(&[0, 1], &model),
            LscpChromosome::from_selection(&[1, 2], &model),
        ],
    };
    assert_eq!(population.average_fitness(), 3.0);

    let child = LscpChromosome::from_selection(&[0], &model);
    assert_eq!(population.replace_above_average(child, &mut rng), Some(2));
    assert_eq!(population.individuals[2].fitness(), 1);
    assert_eq!(population.len(), 3);
    assert_eq!(population.best_index(), 0);
}

#[test]
fn test_replacement_is_noop_for_uniform_population() {
    let problem = create_hub_problem();
    let model = CoverageModel::new(&problem).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(9);

    let mut population = LscpPopulation {
        individuals: vec![LscpChromosome::from_selection(&[1, 2], &model); 4],
    };
    let child = LscpChromosome::from_selection(&[0], &model);

    assert_eq!(population.replace_above_average(child, &mut rng), None);
    assert!(population.individuals.iter().all(|c| c.fitness() == 5));
}

#[test]
fn test_tournament_prefers_lighter_chromosome() {
    let problem = create_hub_problem();
    let model = CoverageModel::new(&problem).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(10);

    let population = LscpPopulation {
        individuals: vec![
            LscpChromosome::from_selection(&[1, 2, 3, 4], &model),
            LscpChromosome::from_selection(&[0], &model),
        ],
    };

    for _ in 0..10 {
        let (parent1, parent2) = population.select_parents(&mut rng);
        assert_eq!(parent1.fitness(), 1);
        assert_eq!(parent2.fitness(), 1);
    }
}
