use anyhow::bail;
use chrono::Utc;

use crate::domain::{
    attribute_slot::{SlotSections, ATTRIBUTE_SLOTS},
    company::{CompanyEnrichment, EnrichmentMetadata},
    domain_name::normalize_domain,
};

use super::{
    CreateWebsetParameters, EnrichmentFormat, EnrichmentParameters, ExaClient, IdleOutcome,
    WebsetEntity, WebsetItem, WebsetSearch,
};

pub enum EnrichmentOutcome {
    Found(CompanyEnrichment),
    NotFound,
}

pub async fn enrich_company(
    exa_client: &ExaClient,
    raw_domain: &str,
) -> anyhow::Result<EnrichmentOutcome> {
    let domain = normalize_domain(raw_domain);
    log::info!("Enriching domain: {}", domain);

    let webset = exa_client
        .create_webset(&build_webset_parameters(&domain))
        .await?;
    log::info!("Created webset {} for {}", webset.id, domain);

    let webset = match exa_client.wait_until_idle(&webset.id).await? {
        IdleOutcome::Idle(webset) => webset,
        IdleOutcome::TimedOut => bail!(
            "Webset {} did not reach idle state within {}ms",
            webset.id,
            exa_client.timeout().as_millis()
        ),
    };

    let items = exa_client.list_items(&webset.id).await?;

    match items.data.into_iter().next() {
        Some(item) => Ok(EnrichmentOutcome::Found(map_item(&domain, &webset.id, item))),
        None => {
            log::info!("Webset {} returned no items for {}", webset.id, domain);
            Ok(EnrichmentOutcome::NotFound)
        }
    }
}

pub fn build_webset_parameters(domain: &str) -> CreateWebsetParameters {
    CreateWebsetParameters {
        search: WebsetSearch {
            query: format!("company website {}", domain),
            count: 1,
            entity: WebsetEntity {
                entity_type: "company".to_string(),
            },
        },
        enrichments: ATTRIBUTE_SLOTS
            .iter()
            .map(|slot| EnrichmentParameters {
                description: slot.description.to_string(),
                format: EnrichmentFormat::Text,
            })
            .collect(),
    }
}

pub fn map_item(domain: &str, webset_id: &str, item: WebsetItem) -> CompanyEnrichment {
    let mut answers = item.enrichments.unwrap_or_default().into_iter();
    let mut sections = SlotSections::default();

    for slot in ATTRIBUTE_SLOTS.iter() {
        let answer = answers
            .next()
            .flatten()
            .and_then(|enrichment| enrichment.result)
            .and_then(|result| result.into_iter().next())
            .flatten();
        slot.destination.apply(&mut sections, answer);
    }

    let properties = item.properties;
    let company = properties.company.unwrap_or_default();

    CompanyEnrichment {
        domain: domain.to_string(),
        name: non_empty(company.name).unwrap_or_else(|| domain.to_string()),
        description: non_empty(company.about)
            .or_else(|| non_empty(properties.description))
            .unwrap_or_default(),
        logo_url: non_empty(company.logo_url),
        financial: sections.financial,
        products: sections.products,
        linkedin: sections.linkedin,
        metadata: EnrichmentMetadata::new(webset_id, Utc::now()),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
