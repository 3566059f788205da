//! Individual enrichment stages.
//!
//! Each stage owns its failure handling and returns a complete partial
//! result; none of them can fail.

use super::{AddressFields, EnrichmentPipeline, MxFields, WhoisFields};
use crate::dns::DnsSource;
use crate::error_handling::InfoType;
use crate::record::join_list;
use crate::whois::{WhoisInfo, WhoisSource};

impl<W: WhoisSource, D: DnsSource> EnrichmentPipeline<W, D> {
    pub(super) async fn whois_stage(&self, domain: &str) -> WhoisFields {
        let Some(client) = &self.whois else {
            return WhoisFields::default();
        };
        match client.query(domain).await {
            Some(info) => self.whois_fields(domain, info),
            None => WhoisFields::default(),
        }
    }

    fn whois_fields(&self, domain: &str, info: WhoisInfo) -> WhoisFields {
        let registrar_country = info
            .registrar
            .as_deref()
            .and_then(|registrar| self.registrar_country(domain, registrar));

        WhoisFields {
            creation_date: info.creation_date,
            expiration_date: info.expiration_date,
            updated_date: info.updated_date,
            dnssec: info.dnssec,
            emails: join_list(&info.emails),
            name_servers: join_list(&info.name_servers),
            registrar: info.registrar,
            registrar_country,
        }
    }

    fn registrar_country(&self, domain: &str, registrar: &str) -> Option<String> {
        let country = self.tables.lookup_registrar_country(registrar);
        if country.is_none() && self.tables.has_registrars() {
            log::debug!("No country for registrar '{}' of {}", registrar, domain);
            self.stats.increment_info(InfoType::RegistrarCountryNoMatch);
        }
        country.map(str::to_string)
    }

    pub(super) async fn address_stage(&self, domain: &str) -> AddressFields {
        let ip_addresses = self.dns.resolve_a(domain).await;
        // Only the first address is attributed to an ASN
        let asn = ip_addresses
            .first()
            .map(|ip| self.asn.lookup(ip))
            .unwrap_or_default();
        AddressFields { ip_addresses, asn }
    }

    pub(super) async fn mx_stage(&self, domain: &str) -> MxFields {
        let exchanges = self.dns.resolve_mx(domain).await;
        let Some(primary) = exchanges.first() else {
            return MxFields::default();
        };

        let ip = self.dns.resolve_host_ip(primary).await;
        let asn = ip
            .as_deref()
            .map(|ip| self.asn.lookup(ip))
            .unwrap_or_default();
        MxFields { exchanges, ip, asn }
    }

    pub(super) async fn name_server_fallback(&self, domain: &str) -> Option<String> {
        log::debug!("No WHOIS name servers for {}, querying NS records", domain);
        self.stats.increment_info(InfoType::NameServerFallback);
        join_list(&self.dns.resolve_ns(domain).await)
    }
}
