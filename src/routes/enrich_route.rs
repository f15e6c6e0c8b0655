use std::time::Instant;

use actix_web::{post, web, HttpResponse};

use crate::{
    domain::company::{EnrichmentRequest, EnrichmentResponse, RequestedDomain},
    services::{enrich_company, EnrichmentOutcome, ExaClient},
};

const DOMAIN_REQUIRED: &str = "Domain is required";
const NO_COMPANY_DATA: &str = "No company data found for this domain";
const UNKNOWN_ERROR: &str = "Unknown error occurred";

#[post("/enrich")]
async fn enrich(exa_client: web::Data<ExaClient>, body: web::Bytes) -> HttpResponse {
    let start_time = Instant::now();

    let request = match serde_json::from_slice::<EnrichmentRequest>(&body) {
        Ok(request) => request,
        Err(e) => {
            return internal_error(
                anyhow::Error::new(e).context("Invalid JSON request body"),
                start_time,
            )
        }
    };

    let raw_domain = match request.requested_domain() {
        RequestedDomain::Domain(domain) => domain,
        RequestedDomain::Missing => {
            log::warn!("Enrichment request without a domain");
            return HttpResponse::BadRequest().json(EnrichmentResponse::rejected(DOMAIN_REQUIRED));
        }
        RequestedDomain::NotAString => {
            return internal_error(anyhow::anyhow!("Domain must be a string"), start_time)
        }
    };

    match enrich_company(&exa_client, raw_domain).await {
        Ok(EnrichmentOutcome::Found(data)) => {
            let processing_time = elapsed_millis(start_time);
            log::info!("Enriched {} in {}ms", data.domain, processing_time);
            HttpResponse::Ok().json(EnrichmentResponse::found(data, processing_time))
        }
        Ok(EnrichmentOutcome::NotFound) => {
            log::warn!("No company data found for {}", raw_domain);
            HttpResponse::NotFound().json(EnrichmentResponse::rejected(NO_COMPANY_DATA))
        }
        Err(e) => internal_error(e, start_time),
    }
}

fn internal_error(error: anyhow::Error, start_time: Instant) -> HttpResponse {
    log::error!("Enrichment error: {:?}", error);

    let message = format!("{:#}", error);
    let message = match message.is_empty() {
        true => UNKNOWN_ERROR.to_string(),
        false => message,
    };

    HttpResponse::InternalServerError()
        .json(EnrichmentResponse::failed(message, elapsed_millis(start_time)))
}

fn elapsed_millis(start_time: Instant) -> u64 {
    start_time.elapsed().as_millis() as u64
}
