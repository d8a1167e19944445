use log::info;
use neuroevo::{Network, Neuroevolution, Params, Topology};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const WIDTH: f32 = 500.0;
const HEIGHT: f32 = 512.0;
const SPAWN_INTERVAL: u32 = 90;
const PIPE_GAP: f32 = 120.0;
const PIPE_MARGIN: f32 = 50.0;
const PIPE_WIDTH: f32 = 50.0;
const PIPE_SPEED: f32 = 3.0;
const MAX_GENERATIONS: usize = 50;
const TARGET_SCORE: u32 = 20_000;

struct Bird {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    velocity: f32,
    alive: bool,
}

impl Bird {
    fn new() -> Self {
        Self {
            x: 80.0,
            y: 250.0,
            width: 40.0,
            height: 30.0,
            velocity: 0.0,
            alive: true,
        }
    }

    fn flap(&mut self) {
        self.velocity = -6.0;
    }

    fn update(&mut self) {
        self.velocity += 0.3;
        self.y += self.velocity;
    }

    fn is_dead(&self, pipes: &[Pipe]) -> bool {
        if self.y >= HEIGHT || self.y + self.height <= 0.0 {
            return true;
        }
        pipes.iter().any(|pipe| {
            !(self.x > pipe.x + PIPE_WIDTH
                || self.x + self.width < pipe.x
                || self.y > pipe.y + pipe.height
                || self.y + self.height < pipe.y)
        })
    }
}

struct Pipe {
    x: f32,
    y: f32,
    height: f32,
}

/// Plays one epoch until every bird has crashed. Returns the last frame count.
fn play_epoch(engine: &mut Neuroevolution, rng: &mut StdRng) -> neuroevo::Result<u32> {
    let mut networks: Vec<Network> = engine.next_generation()?;
    let mut birds: Vec<Bird> = networks.iter().map(|_| Bird::new()).collect();
    let mut pipes: Vec<Pipe> = Vec::new();
    let mut alive = birds.len();
    let mut frame = 0;

    while alive > 0 && frame < TARGET_SCORE {
        let next_hole = pipes
            .chunks(2)
            .find(|pair| pair[0].x + PIPE_WIDTH > birds[0].x)
            .map_or(0.0, |pair| pair[0].height);

        for (bird, network) in birds.iter_mut().zip(networks.iter_mut()) {
            if !bird.alive {
                continue;
            }
            let output = network.compute(&[bird.y / HEIGHT, next_hole / HEIGHT]);
            if output[0] > 0.5 {
                bird.flap();
            }
            bird.update();
            if bird.is_dead(&pipes) {
                bird.alive = false;
                alive -= 1;
                engine.network_score(network, f64::from(frame))?;
            }
        }

        for pipe in &mut pipes {
            pipe.x -= PIPE_SPEED;
        }
        pipes.retain(|pipe| pipe.x + PIPE_WIDTH >= 0.0);

        if frame % SPAWN_INTERVAL == 0 {
            let hole = rng
                .random_range(0.0..=HEIGHT - PIPE_MARGIN * 2.0 - PIPE_GAP)
                .round()
                + PIPE_MARGIN;
            pipes.push(Pipe {
                x: WIDTH,
                y: 0.0,
                height: hole,
            });
            pipes.push(Pipe {
                x: WIDTH,
                y: hole + PIPE_GAP,
                height: HEIGHT,
            });
        }
        frame += 1;
    }

    // Survivors at the frame cap are scored too.
    for (bird, network) in birds.iter().zip(&networks) {
        if bird.alive {
            engine.network_score(network, f64::from(frame))?;
        }
    }
    Ok(frame)
}

fn main() -> neuroevo::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let params = Params {
        topology: Topology::new(2, vec![2], 1),
        population: 50,
        seed: Some(7),
        ..Params::default()
    };
    let mut engine = Neuroevolution::new(params)?;
    let mut rng = StdRng::seed_from_u64(11);

    info!("Starting headless flappy training");

    for generation in 0..MAX_GENERATIONS {
        let frames = play_epoch(&mut engine, &mut rng)?;
        info!(
            "generation {}: lasted {} frames, best score {:?}",
            generation,
            frames,
            engine.best_score()
        );
        if frames >= TARGET_SCORE {
            info!("target reached after {} generations", generation + 1);
            break;
        }
    }
    Ok(())
}
