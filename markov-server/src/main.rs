use std::sync::Mutex;

use actix_cors::Cors;
use actix_web::{get, put, web, App, HttpResponse, HttpServer, Responder};
use clap::Parser;
use log::{info, warn};

use serde::{Deserialize, Serialize};
use markov_core::config::GenerationConfig;
use markov_core::error::ChainError;
use markov_core::io::read_corpus;
use markov_core::model::chain::{ChainState, MarkovChain, DEFAULT_LENGTH};

/// Default cap on the number of tokens a single request may ask for.
const DEFAULT_MAX_LENGTH: usize = 10_000;

/// HTTP front-end serving a single shared Markov chain.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
	/// Address to bind.
	#[arg(long, default_value = "127.0.0.1")]
	host: String,

	/// Port to bind.
	#[arg(long, default_value_t = 5000)]
	port: u16,

	/// Order of the chain created at startup.
	#[arg(long, default_value_t = 1)]
	order: usize,

	/// Fixed RNG seed, for reproducible output.
	#[arg(long)]
	seed: Option<u64>,

	/// Largest `length` accepted by `/v1/generate`.
	#[arg(long, default_value_t = DEFAULT_MAX_LENGTH)]
	max_length: usize,

	/// Text file to train on before serving.
	#[arg(long)]
	corpus: Option<String>,
}

/// Query parameters for the `/v1/generate` endpoint
#[derive(Deserialize)]
struct GenerateParams {
	length: Option<usize>,
}

/// Query parameters for the `/v1/reset` endpoint
#[derive(Deserialize)]
struct ResetParams {
	order: Option<usize>,
	seed: Option<u64>,
}

/// Body of the `/v1/model` response
#[derive(Serialize)]
struct ModelSummary {
	order: usize,
	keys: usize,
	trained: bool,
}

/// The chain behind the lock. `train` and `generate` both need exclusive
/// access, so every handler goes through the `Mutex`.
struct SharedData {
	chain: MarkovChain,
	/// Requests above this length are rejected before sampling.
	max_length: usize,
}

fn error_response(e: &ChainError) -> HttpResponse {
	match e {
		ChainError::InsufficientData { .. } | ChainError::InvalidOrder(_) => HttpResponse::BadRequest().body(e.to_string()),
		ChainError::NotTrained => HttpResponse::Conflict().body(e.to_string()),
		ChainError::Io(_) => HttpResponse::InternalServerError().body(e.to_string()),
	}
}

/// HTTP PUT endpoint `/v1/train`
///
/// Adds the request body to the chain. Training is cumulative.
#[put("/v1/train")]
async fn put_train(data: web::Data<Mutex<SharedData>>, body: String) -> impl Responder {
	let mut shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};

	match shared_data.chain.train(&body) {
		Ok(()) => HttpResponse::Ok().body(format!("{} state(s)", shared_data.chain.len())),
		Err(e) => {
			warn!("training rejected: {e}");
			error_response(&e)
		}
	}
}

/// HTTP GET endpoint `/v1/generate`
///
/// Samples a sentence of up to `length` tokens (100 by default).
/// Lengths above `--max-length` get a 400.
#[get("/v1/generate")]
async fn get_generated(data: web::Data<Mutex<SharedData>>, query: web::Query<GenerateParams>) -> impl Responder {
	let length = query.length.unwrap_or(DEFAULT_LENGTH);

	let mut shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};

	if length > shared_data.max_length {
		return HttpResponse::BadRequest().body(format!("length must be <= {}, got {}", shared_data.max_length, length));
	}

	match shared_data.chain.generate(length) {
		Ok(result) => HttpResponse::Ok().body(result),
		Err(e) => error_response(&e),
	}
}

#[get("/v1/model")]
async fn get_model(data: web::Data<Mutex<SharedData>>) -> impl Responder {
	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};
	let chain = &shared_data.chain;
	HttpResponse::Ok().json(ModelSummary {
		order: chain.order(),
		keys: chain.len(),
		trained: chain.state() == ChainState::Trained,
	})
}

/// HTTP PUT endpoint `/v1/reset`
///
/// Drops the current chain and starts over with an empty one.
#[put("/v1/reset")]
async fn put_reset(data: web::Data<Mutex<SharedData>>, query: web::Query<ResetParams>) -> impl Responder {
	let mut shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};

	let config = GenerationConfig {
		order: query.order.unwrap_or(shared_data.chain.order()),
		seed: query.seed,
		..Default::default()
	};
	match config.build_chain() {
		Ok(chain) => {
			info!("model reset to order {}", chain.order());
			shared_data.chain = chain;
			HttpResponse::Ok().body("Model reset")
		}
		Err(e) => error_response(&e),
	}
}

/// Builds the startup chain, training it on `--corpus` when given.
fn initial_chain(args: &Args) -> Result<MarkovChain, ChainError> {
	let config = GenerationConfig {
		order: args.order,
		seed: args.seed,
		..Default::default()
	};
	let mut chain = config.build_chain()?;

	if let Some(path) = &args.corpus {
		chain.train(&read_corpus(path)?)?;
		info!("trained on {path}: {} state(s)", chain.len());
	}
	Ok(chain)
}

/// Main entry point for the server.
///
/// Builds the chain, wraps it in a `Mutex` for thread safety,
/// and starts an Actix-web HTTP server.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
	env_logger::init();
	let args = Args::parse();

	let chain = initial_chain(&args).map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
	let shared_model = web::Data::new(Mutex::new(SharedData { chain, max_length: args.max_length }));

	info!("listening on {}:{}", args.host, args.port);
	HttpServer::new(move || {
		App::new()
			.wrap(Cors::permissive())
			.app_data(shared_model.clone())
			.service(put_train)
			.service(get_generated)
			.service(get_model)
			.service(put_reset)
	})
		.bind((args.host.as_str(), args.port))?
		.run()
		.await
}
