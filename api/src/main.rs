//! A web server for running a private tennis pick league.

#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::needless_pass_by_value)]

#[macro_use]
extern crate rocket;

mod helpers;
mod pages;

use helpers::{
    ApiResult, PageError, PageResult, RequestTimingFairing, api_error, blocking, page_error,
};
use league_common::config::{LeagueConfig, load_dotenv};
use league_common::leaderboard::{EventBreakdown, Standing};
use league_common::league::League;
use league_common::{EventRecord, ScoringRule};

use anyhow::anyhow;
use clap::Parser;
use rocket::form::Form;
use rocket::response::Redirect;
use rocket::response::content::RawHtml;
use rocket::serde::json::Json;
use rocket::{Build, Rocket, State};
use rocket_prometheus::PrometheusMetrics;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    config: LeagueConfig,
}

#[derive(FromForm)]
struct PersonForm {
    name: String,
}

#[derive(FromForm)]
struct PickForm {
    person: String,
    event_id: String,
    player: String,
}

#[derive(FromForm)]
struct ResultForm {
    commissioner_key: String,
    event_id: String,
    player: String,
    round_reached: String,
}

#[derive(FromForm)]
struct ScoringRuleForm {
    commissioner_key: String,
    round: String,
    points: u32,
}

#[derive(FromForm)]
struct RemoveScoringRuleForm {
    commissioner_key: String,
    round: String,
}

#[get("/")]
async fn home(league: &State<Arc<League>>) -> PageResult {
    let (year, standings, breakdown, events) = blocking(league, |league| {
        Ok((
            league.year(),
            league.standings()?,
            league.season_breakdown()?,
            league.events()?,
        ))
    })
    .await
    .map_err(|e| page_error(&e))?;
    Ok(RawHtml(pages::render_home(
        year,
        &standings,
        &breakdown,
        &events,
    )))
}

#[post("/people", data = "<form>")]
async fn add_person(
    league: &State<Arc<League>>,
    form: Form<PersonForm>,
) -> Result<Redirect, PageError> {
    let form = form.into_inner();
    blocking(league, move |league| league.add_person(&form.name))
        .await
        .map_err(|e| page_error(&e))?;
    Ok(Redirect::to(uri!(home)))
}

#[get("/picks")]
async fn picks_page(league: &State<Arc<League>>) -> PageResult {
    let (year, people, events, players) = blocking(league, |league| {
        Ok((
            league.year(),
            league.people()?,
            league.events()?,
            league.players()?,
        ))
    })
    .await
    .map_err(|e| page_error(&e))?;
    Ok(RawHtml(pages::render_picks(year, &people, &events, &players)))
}

#[post("/picks", data = "<form>")]
async fn submit_pick(
    league: &State<Arc<League>>,
    form: Form<PickForm>,
) -> Result<Redirect, PageError> {
    let form = form.into_inner();
    blocking(league, move |league| {
        league.submit_pick(&form.person, &form.event_id, &form.player)
    })
    .await
    .map_err(|e| page_error(&e))?;
    Ok(Redirect::to(uri!(picks_page)))
}

#[get("/results")]
async fn results_page(league: &State<Arc<League>>) -> PageResult {
    let (year, events, players) = blocking(league, |league| {
        Ok((league.year(), league.events()?, league.players()?))
    })
    .await
    .map_err(|e| page_error(&e))?;
    Ok(RawHtml(pages::render_results(year, &events, &players)))
}

#[post("/results", data = "<form>")]
async fn submit_result(
    league: &State<Arc<League>>,
    form: Form<ResultForm>,
) -> Result<Redirect, PageError> {
    let form = form.into_inner();
    let result = blocking(league, move |league| {
        league.submit_result(
            &form.commissioner_key,
            &form.event_id,
            &form.player,
            &form.round_reached,
        )
    })
    .await
    .map_err(|e| page_error(&e))?;
    tracing::info!(
        event_id = %result.event_id,
        player_id = %result.player_id,
        round = %result.round_reached,
        "Result recorded"
    );
    Ok(Redirect::to(uri!(results_page)))
}

#[get("/scoring")]
async fn scoring_page(league: &State<Arc<League>>) -> PageResult {
    let table = blocking(league, League::scoring_table)
        .await
        .map_err(|e| page_error(&e))?;
    Ok(RawHtml(pages::render_scoring(&table)))
}

#[post("/scoring", data = "<form>")]
async fn set_scoring_rule(
    league: &State<Arc<League>>,
    form: Form<ScoringRuleForm>,
) -> Result<Redirect, PageError> {
    let form = form.into_inner();
    let rule = blocking(league, move |league| {
        league.set_scoring_rule(&form.commissioner_key, &form.round, form.points)
    })
    .await
    .map_err(|e| page_error(&e))?;
    tracing::info!(round = %rule.round, points = rule.points, "Scoring rule set");
    Ok(Redirect::to(uri!(scoring_page)))
}

#[post("/scoring/delete", data = "<form>")]
async fn remove_scoring_rule(
    league: &State<Arc<League>>,
    form: Form<RemoveScoringRuleForm>,
) -> Result<Redirect, PageError> {
    let form = form.into_inner();
    let round = blocking(league, move |league| {
        league.remove_scoring_rule(&form.commissioner_key, &form.round)
    })
    .await
    .map_err(|e| page_error(&e))?;
    tracing::info!(round = %round, "Scoring rule removed");
    Ok(Redirect::to(uri!(scoring_page)))
}

#[get("/events/<event_id>")]
async fn event_page(league: &State<Arc<League>>, event_id: String) -> PageResult {
    let breakdown = blocking(league, move |league| league.event_breakdown(&event_id))
        .await
        .map_err(|e| page_error(&e))?;
    Ok(RawHtml(pages::render_event(&breakdown)))
}

#[get("/api/standings")]
async fn api_standings(league: &State<Arc<League>>) -> ApiResult<Vec<Standing>> {
    blocking(league, League::standings)
        .await
        .map(Json)
        .map_err(|e| api_error(&e))
}

#[get("/api/events")]
async fn api_events(league: &State<Arc<League>>) -> ApiResult<Vec<EventRecord>> {
    blocking(league, League::events)
        .await
        .map(Json)
        .map_err(|e| api_error(&e))
}

#[get("/api/events/<event_id>")]
async fn api_event(league: &State<Arc<League>>, event_id: String) -> ApiResult<EventBreakdown> {
    blocking(league, move |league| league.event_breakdown(&event_id))
        .await
        .map(Json)
        .map_err(|e| api_error(&e))
}

#[get("/api/scoring")]
async fn api_scoring(league: &State<Arc<League>>) -> ApiResult<Vec<ScoringRule>> {
    blocking(league, |league| Ok(league.scoring_table()?.rules()))
        .await
        .map(Json)
        .map_err(|e| api_error(&e))
}

#[catch(404)]
fn not_found() -> RawHtml<String> {
    RawHtml(pages::render_error(
        rocket::http::Status::NotFound,
        "The requested page could not be found.",
    ))
}

fn build_rocket(league: League) -> Rocket<Build> {
    let prometheus = PrometheusMetrics::new();

    rocket::build()
        .manage(Arc::new(league))
        .attach(RequestTimingFairing)
        .attach(prometheus.clone())
        .mount(
            "/",
            routes![
                home,
                add_person,
                picks_page,
                submit_pick,
                results_page,
                submit_result,
                scoring_page,
                set_scoring_rule,
                remove_scoring_rule,
                event_page,
                api_standings,
                api_events,
                api_event,
                api_scoring,
            ],
        )
        .mount("/metrics", prometheus)
        .register("/", catchers![not_found])
}

#[rocket::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let store = cli.config.open_store()?;
    let league = League::new(
        store,
        cli.config.league_year,
        cli.config.commissioner_key.clone(),
    );

    let seeded = league.seed_season()?;
    tracing::info!(
        year = league.year(),
        events_inserted = seeded.events_inserted,
        scoring_rules_inserted = seeded.scoring_rules_inserted,
        "League ready"
    );

    build_rocket(league)
        .launch()
        .await
        .map_err(|e| anyhow!("Server failed: {e}"))?;
    Ok(())
}
