use crate::domain::model::{CaseStudy, Service};
use crate::utils::error::{Result, SiteError};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

const BUILTIN_SERVICES: &str = include_str!("../../content/services.toml");
const BUILTIN_CASE_STUDIES: &str = include_str!("../../content/case_studies.toml");

#[derive(Debug, Deserialize)]
struct ServicesFile {
    #[serde(default)]
    services: Vec<Service>,
}

#[derive(Debug, Deserialize)]
struct CaseStudiesFile {
    #[serde(default)]
    case_studies: Vec<CaseStudy>,
}

/// Read-only store of the site's services and case studies.
///
/// Records keep the order they were loaded in. Lookups are linear scans,
/// the collections are a handful of entries.
#[derive(Debug, Clone)]
pub struct ContentRepository {
    services: Vec<Service>,
    case_studies: Vec<CaseStudy>,
}

impl ContentRepository {
    /// 建立內容庫並檢查 slug 唯一性
    pub fn new(services: Vec<Service>, case_studies: Vec<CaseStudy>) -> Result<Self> {
        ensure_unique_slugs("service", services.iter().map(|s| s.slug.as_str()))?;
        ensure_unique_slugs("case study", case_studies.iter().map(|c| c.slug.as_str()))?;

        tracing::debug!(
            "Loaded {} services and {} case studies",
            services.len(),
            case_studies.len()
        );

        Ok(Self {
            services,
            case_studies,
        })
    }

    /// 編譯時內嵌的預設內容
    pub fn builtin() -> Result<Self> {
        Self::from_toml_strs(BUILTIN_SERVICES, BUILTIN_CASE_STUDIES)
    }

    pub fn from_toml_strs(services_toml: &str, case_studies_toml: &str) -> Result<Self> {
        let services: ServicesFile = toml::from_str(services_toml)?;
        let case_studies: CaseStudiesFile = toml::from_str(case_studies_toml)?;
        Self::new(services.services, case_studies.case_studies)
    }

    /// Loads content from files, falling back to the built-in set for any
    /// collection without a path.
    pub fn from_files(
        services_path: Option<&Path>,
        case_studies_path: Option<&Path>,
    ) -> Result<Self> {
        let services_toml = match services_path {
            Some(path) => {
                tracing::info!("📁 Loading services from {}", path.display());
                std::fs::read_to_string(path)?
            }
            None => BUILTIN_SERVICES.to_string(),
        };
        let case_studies_toml = match case_studies_path {
            Some(path) => {
                tracing::info!("📁 Loading case studies from {}", path.display());
                std::fs::read_to_string(path)?
            }
            None => BUILTIN_CASE_STUDIES.to_string(),
        };

        Self::from_toml_strs(&services_toml, &case_studies_toml)
    }

    pub fn all_services(&self) -> &[Service] {
        &self.services
    }

    pub fn service_by_slug(&self, slug: &str) -> Result<&Service> {
        self.services
            .iter()
            .find(|service| service.slug == slug)
            .ok_or_else(|| SiteError::NotFoundError {
                kind: "service",
                slug: slug.to_string(),
            })
    }

    pub fn all_case_studies(&self) -> &[CaseStudy] {
        &self.case_studies
    }

    pub fn case_study_by_slug(&self, slug: &str) -> Result<&CaseStudy> {
        self.case_studies
            .iter()
            .find(|case_study| case_study.slug == slug)
            .ok_or_else(|| SiteError::NotFoundError {
                kind: "case study",
                slug: slug.to_string(),
            })
    }
}

fn ensure_unique_slugs<'a>(kind: &str, slugs: impl Iterator<Item = &'a str>) -> Result<()> {
    let mut seen = HashSet::new();
    for slug in slugs {
        if slug.trim().is_empty() {
            return Err(SiteError::ContentError {
                message: format!("{} with an empty slug", kind),
            });
        }
        if !seen.insert(slug) {
            return Err(SiteError::ContentError {
                message: format!("duplicate {} slug '{}'", kind, slug),
            });
        }
    }
    Ok(())
}
