use std::env;

use anyhow::{Context, Result};
use bq_query_job::{Client, ClientConfig, QueryResultsOptions};
use log::info;

const MAX_RESULTS: u32 = 10;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let project_id = env::var("BIGQUERY_PROJECT_ID").context("BIGQUERY_PROJECT_ID is not set")?;
    let job_id = env::args()
        .nth(1)
        .context("usage: bq_query_job <job-id>")?;

    let client = Client::new(ClientConfig::from_env())
        .await
        .context("failed to create BigQuery client")?;
    let job = client
        .get_query_job(&project_id, &job_id)
        .await
        .with_context(|| format!("failed to fetch job {}", job_id))?;
    info!("Fetched job {:?} in state {:?}", job.job_id(), job.state());

    println!("query:          {}", job.query().unwrap_or(""));
    println!("interactive:    {}", job.is_interactive());
    println!("batch:          {}", job.is_batch());
    println!("large results:  {}", job.large_results());
    println!("query cache:    {}", job.cache());
    println!("flatten:        {}", job.flatten());
    println!("legacy sql:     {}", job.legacy_sql());
    println!("cache hit:      {:?}", job.cache_hit());
    println!("bytes processed {:?}", job.bytes_processed());
    if let Some(table) = job.destination().await? {
        println!("destination:    {}", table.table_reference);
    }

    let page = job
        .query_results(QueryResultsOptions::default().with_max_results(MAX_RESULTS))
        .await?;
    if !page.job_complete() {
        println!("Job is not complete yet");
        return Ok(());
    }
    println!("{}", page.headers().join("\t"));
    for row in page.formatted_rows()? {
        let cells: Vec<String> = row.iter().map(|(_, value)| format!("{:?}", value)).collect();
        println!("{}", cells.join("\t"));
    }
    if let Some(total) = page.total() {
        println!("({} of {} rows)", page.len(), total);
    }
    Ok(())
}
