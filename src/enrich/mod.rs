//! Per-domain enrichment pipeline.
//!
//! [`EnrichmentPipeline::enrich`] turns one input line into one
//! [`DomainRecord`]. Each stage returns its own partial result and degrades
//! to nulls on failure; the stages are merged once at the end. The WHOIS,
//! address, TXT and MX stages are independent and run concurrently; the
//! name server fallback waits for WHOIS because it only runs when WHOIS
//! supplied no name servers.

mod stages;

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::asn::{AsnInfo, AsnLookup};
use crate::dns::{DnsResolver, DnsSource, TxtRecords};
use crate::domain::extract_base_domain;
use crate::error_handling::{EnrichError, ProcessingStats};
use crate::record::{join_list, DomainRecord};
use crate::reference::ReferenceTables;
use crate::whois::{WhoisClient, WhoisSource};

/// WHOIS-derived columns, all `None` when WHOIS failed or was skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WhoisFields {
    pub creation_date: Option<DateTime<Utc>>,
    pub expiration_date: Option<DateTime<Utc>>,
    pub updated_date: Option<DateTime<Utc>>,
    pub dnssec: Option<String>,
    pub emails: Option<String>,
    pub name_servers: Option<String>,
    pub registrar: Option<String>,
    pub registrar_country: Option<String>,
}

/// The domain's own addresses and the ASN of the first one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressFields {
    pub ip_addresses: Vec<String>,
    pub asn: AsnInfo,
}

/// MX exchanges plus the address and ASN of the first one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MxFields {
    pub exchanges: Vec<String>,
    pub ip: Option<String>,
    pub asn: AsnInfo,
}

/// Stateless enrichment of one domain at a time.
///
/// Holds only read-only collaborators, so a single instance is shared by
/// every concurrent task (behind an `Arc`).
pub struct EnrichmentPipeline<W, D> {
    extractor: psl::List,
    whois: Option<WhoisClient<W>>,
    dns: DnsResolver<D>,
    asn: AsnLookup,
    tables: Arc<ReferenceTables>,
    stats: Arc<ProcessingStats>,
}

impl<W: WhoisSource, D: DnsSource> EnrichmentPipeline<W, D> {
    /// Builds a pipeline. Pass `None` for `whois` to skip WHOIS entirely; every
    /// WHOIS column is then null and name servers come from DNS.
    pub fn new(
        whois: Option<WhoisClient<W>>,
        dns: DnsResolver<D>,
        tables: Arc<ReferenceTables>,
        stats: Arc<ProcessingStats>,
    ) -> Self {
        Self {
            extractor: psl::List,
            whois,
            dns,
            asn: AsnLookup::new(Arc::clone(&tables), Arc::clone(&stats)),
            tables,
            stats,
        }
    }

    pub fn stats(&self) -> &Arc<ProcessingStats> {
        &self.stats
    }

    /// Enriches one domain-ish input into a record.
    ///
    /// # Errors
    ///
    /// Only [`EnrichError::InputMalformed`]: the input has no registrable base
    /// domain. Every lookup failure degrades to null fields instead.
    pub async fn enrich(&self, input: &str) -> Result<DomainRecord, EnrichError> {
        let domain = extract_base_domain(&self.extractor, input)?;
        log::debug!("Enriching {} (input '{}')", domain, input.trim());

        let (whois, addresses, txt, mx) = tokio::join!(
            self.whois_stage(&domain),
            self.address_stage(&domain),
            self.dns.resolve_txt(&domain),
            self.mx_stage(&domain),
        );

        let name_servers = match whois.name_servers.clone() {
            Some(from_whois) => Some(from_whois),
            None => self.name_server_fallback(&domain).await,
        };

        Ok(assemble(domain, whois, name_servers, addresses, txt, mx))
    }
}

fn assemble(
    domain: String,
    whois: WhoisFields,
    name_servers: Option<String>,
    addresses: AddressFields,
    txt: TxtRecords,
    mx: MxFields,
) -> DomainRecord {
    DomainRecord {
        domain,
        creation_date: whois.creation_date,
        expiration_date: whois.expiration_date,
        updated_date: whois.updated_date,
        dnssec: whois.dnssec,
        emails: whois.emails,
        name_servers,
        registrar: whois.registrar,
        registrar_country: whois.registrar_country,
        ip_addresses: join_list(&addresses.ip_addresses),
        asn: addresses.asn.asn,
        asn_country: addresses.asn.country,
        asn_description: addresses.asn.description,
        txt: join_list(&txt.txt),
        spf: join_list(&txt.spf),
        mx: join_list(&mx.exchanges),
        mx_ip: mx.ip,
        mx_asn: mx.asn.asn,
        mx_asn_country: mx.asn.country,
        mx_asn_description: mx.asn.description,
    }
}
