//! Site directory client
//!
//! Read-through cache in front of the site information service. Every call
//! is answered from a file in the cache directory while it is fresh, and
//! fetched again otherwise. Replies are columnar JSON which is flattened back
//! into one [`Row`] per entry before any lookup sees it.
//!
//! The lookups translate between the naming schemes a site goes by:
//!
//! | Scheme         | Rows                          | Field   |
//! | -------------- | ----------------------------- | ------- |
//! | CMS name       | `site-names`, `type = cms`    | `alias` |
//! | PhEDEx node    | `site-names`, `type = phedex` | `alias` |
//! | CE / SE host   | `site-resources`, `type = CE \| SE` | `fqdn` |
//!
//! All of them meet on `site_name`, the directory's own name for a site.
pub mod cache;
pub mod fetch;
mod json;

use std::collections::HashSet;
use std::io::Write;
use std::time::Duration;

use log::{debug, warn};
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use regex::Regex;
use serde_json::Value;
use thiserror::Error;

use crate::config::SiteDbConfig;
use crate::sitedb::cache::{default_cache_dir, ResponseCache};
use crate::sitedb::fetch::{Fetch, FetchError, HttpFetcher};

/// One directory entry, column name -> value.
pub type Row = serde_json::Map<String, Value>;

pub const SE_NODE_MAP_REPORT: &str = "se_node_map.ini";

const PEOPLE_FILE: &str = "people.json";
const SITE_NAMES_FILE: &str = "site-names.json";
const SITE_RESOURCES_FILE: &str = "site-resources.json";
const GROUP_RESPONSIBILITIES_FILE: &str = "GroupResponsibilities.json";

// Node suffixes that are not part of the site name
const NODE_SUFFIXES: [&str; 3] = ["_MSS", "_Buffer", "_Export"];

#[derive(Error, Debug)]
pub enum SiteDbError {
    #[error(transparent)]
    IOError(#[from] std::io::Error),
    #[error("URL not available: {call}")]
    Unavailable {
        call: String,
        #[source]
        source: FetchError,
    },
    #[error("problem parsing {file}, cache file cleared, retrying may work")]
    Parse {
        file: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("not found: {0}")]
    NotFound(String),
    #[error("bad site name pattern: {0}")]
    PatternError(#[from] regex::Error),
    #[error("report rendering failed: {0}")]
    XmlError(#[from] quick_xml::Error),
    #[error("report {0} not implemented")]
    Report(String),
    #[error(transparent)]
    FetchError(#[from] FetchError),
}

fn field<'a>(row: &'a Row, key: &str) -> Option<&'a str> {
    row.get(key).and_then(Value::as_str)
}

fn is_type(row: &Row, typ: &str) -> bool {
    field(row, "type") == Some(typ)
}

fn fields(rows: &[Row], key: &str) -> Vec<String> {
    rows.iter()
        .filter_map(|row| field(row, key))
        .map(str::to_string)
        .collect()
}

/// `T1*` / `%T2_DE` style pattern, matched from the start of the name.
pub fn site_pattern(pattern: &str) -> Result<Regex, regex::Error> {
    let pattern = pattern.replace('*', ".*").replace('%', ".*");
    Regex::new(&format!("^(?:{})", pattern))
}

/// PhEDEx node name to CMS site name, by dropping the storage suffixes.
pub fn phedex_node_to_cms_name(node: &str) -> String {
    NODE_SUFFIXES
        .iter()
        .fold(node.to_string(), |name, suffix| name.replace(suffix, ""))
}

pub struct SiteDb<F: Fetch = HttpFetcher> {
    fetcher: F,
    cache: ResponseCache,
}

impl SiteDb<HttpFetcher> {
    pub fn from_config(config: &SiteDbConfig) -> Result<Self, SiteDbError> {
        let dir = config.cache_dir.clone().unwrap_or_else(default_cache_dir);
        let cache = ResponseCache::new(dir, Duration::from_secs(config.cache_duration_secs))?;
        Ok(SiteDb::new(HttpFetcher::new(config)?, cache))
    }
}

impl<F: Fetch> SiteDb<F> {
    pub fn new(fetcher: F, cache: ResponseCache) -> Self {
        debug!("Site directory cache in {}", cache.dir().display());
        SiteDb { fetcher, cache }
    }

    /// Forgets every cached reply the lookups below rely on.
    pub fn clear_cache(&self) -> Result<(), SiteDbError> {
        for file in [PEOPLE_FILE, SITE_NAMES_FILE, SITE_RESOURCES_FILE, GROUP_RESPONSIBILITIES_FILE] {
            self.cache.clear(file)?;
        }
        Ok(())
    }

    /// Rows of `call`, cached under `file`.
    ///
    /// A reply that does not decode is removed from the cache before the
    /// error is returned, so the next call fetches it again.
    pub fn get_json(
        &self,
        call: &str,
        file: &str,
        clear_cache: bool,
        args: &[(&str, &str)],
    ) -> Result<Vec<Row>, SiteDbError> {
        if clear_cache {
            self.cache.clear(file)?;
        }

        let text = self.cache.refresh(file, || {
            self.fetcher
                .fetch(call, args)
                .map_err(|source| SiteDbError::Unavailable {
                    call: call.to_string(),
                    source,
                })
        })?;

        match json::unflatten(&text) {
            Ok(rows) => Ok(rows),
            Err(source) => {
                warn!("Dropping undecodable reply for {} from {}", call, file);
                self.cache.clear(file)?;
                Err(SiteDbError::Parse {
                    file: file.to_string(),
                    source,
                })
            }
        }
    }

    pub fn people(&self, username: Option<&str>, clear_cache: bool) -> Result<Vec<Row>, SiteDbError> {
        match username {
            Some(user) => {
                let file = format!("people_{}.json", user);
                self.get_json("people", &file, clear_cache, &[("match", user)])
            }
            None => self.get_json("people", PEOPLE_FILE, clear_cache, &[]),
        }
    }

    pub fn site_names(&self, site_name: Option<&str>, clear_cache: bool) -> Result<Vec<Row>, SiteDbError> {
        let rows = self.get_json("site-names", SITE_NAMES_FILE, clear_cache, &[])?;
        Ok(match site_name {
            Some(site) => rows
                .into_iter()
                .filter(|row| field(row, "site_name") == Some(site))
                .collect(),
            None => rows,
        })
    }

    pub fn site_resources(&self, clear_cache: bool) -> Result<Vec<Row>, SiteDbError> {
        self.get_json("site-resources", SITE_RESOURCES_FILE, clear_cache, &[])
    }

    fn find_username(&self, dn: &str, clear_cache: bool) -> Result<Option<String>, SiteDbError> {
        Ok(self
            .people(None, clear_cache)?
            .iter()
            .find(|row| field(row, "dn") == Some(dn))
            .and_then(|row| field(row, "username"))
            .map(str::to_string))
    }

    // A DN may belong to someone who only just registered, so a miss is
    // retried once against a fresh copy.
    fn username_retrying(&self, dn: &str) -> Result<String, SiteDbError> {
        if let Some(user) = self.find_username(dn, false)? {
            return Ok(user);
        }
        debug!("No user for {} in cached people, refetching", dn);
        self.find_username(dn, true)?
            .ok_or_else(|| SiteDbError::NotFound(format!("user with dn {}", dn)))
    }

    /// Account name of the person holding certificate `dn`.
    pub fn dn_user_name(&self, dn: &str) -> Result<String, SiteDbError> {
        self.username_retrying(dn)
    }

    /// Group responsibility rows of the person holding `dn`.
    pub fn group_responsibilities(&self, dn: &str) -> Result<Vec<Row>, SiteDbError> {
        let user = self.username_retrying(dn)?;

        let filter = |rows: Vec<Row>| -> Vec<Row> {
            rows.into_iter()
                .filter(|row| field(row, "username") == Some(user.as_str()))
                .collect()
        };

        let rows = filter(self.get_json("group-responsibilities", GROUP_RESPONSIBILITIES_FILE, false, &[])?);
        if !rows.is_empty() {
            return Ok(rows);
        }
        Ok(filter(self.get_json(
            "group-responsibilities",
            GROUP_RESPONSIBILITIES_FILE,
            true,
            &[],
        )?))
    }

    /// Hosts of type `kind` (`CE` or `SE`) at every site whose CMS name
    /// matches `pattern`.
    pub fn cms_name_to_list(&self, pattern: &str, kind: &str) -> Result<Vec<String>, SiteDbError> {
        let pattern = site_pattern(pattern)?;

        let sites: HashSet<String> = self
            .site_names(None, false)?
            .iter()
            .filter(|row| is_type(row, "cms") && field(row, "alias").is_some_and(|a| pattern.is_match(a)))
            .filter_map(|row| field(row, "site_name"))
            .map(str::to_string)
            .collect();

        let hosts: Vec<Row> = self
            .site_resources(false)?
            .into_iter()
            .filter(|row| field(row, "site_name").is_some_and(|s| sites.contains(s)) && is_type(row, kind))
            .collect();
        Ok(fields(&hosts, "fqdn"))
    }

    pub fn cms_name_to_ce(&self, cms_name: &str) -> Result<Vec<String>, SiteDbError> {
        self.cms_name_to_list(cms_name, "CE")
    }

    pub fn cms_name_to_se(&self, cms_name: &str) -> Result<Vec<String>, SiteDbError> {
        self.cms_name_to_list(cms_name, "SE")
    }

    fn resources_of_kind(&self, kind: &str) -> Result<Vec<String>, SiteDbError> {
        let rows: Vec<Row> = self
            .site_resources(false)?
            .into_iter()
            .filter(|row| is_type(row, kind))
            .collect();
        Ok(fields(&rows, "fqdn"))
    }

    pub fn all_ce_names(&self) -> Result<Vec<String>, SiteDbError> {
        self.resources_of_kind("CE")
    }

    pub fn all_se_names(&self) -> Result<Vec<String>, SiteDbError> {
        self.resources_of_kind("SE")
    }

    pub fn all_cms_names(&self) -> Result<Vec<String>, SiteDbError> {
        let rows: Vec<Row> = self
            .site_names(None, false)?
            .into_iter()
            .filter(|row| is_type(row, "cms"))
            .collect();
        Ok(fields(&rows, "alias"))
    }

    // A host can be shared between sites, so this is one-to-many
    fn host_to_cms_names(&self, host: &str) -> Result<Vec<String>, SiteDbError> {
        let names = self.site_names(None, false)?;

        let mut aliases = Vec::new();
        for resource in self.site_resources(false)?.iter().filter(|r| field(r, "fqdn") == Some(host)) {
            let site = field(resource, "site_name");
            aliases.extend(
                names
                    .iter()
                    .filter(|row| site.is_some() && field(row, "site_name") == site && is_type(row, "cms"))
                    .filter_map(|row| field(row, "alias"))
                    .map(str::to_string),
            );
        }
        Ok(aliases)
    }

    pub fn ce_to_cms_name(&self, ce: &str) -> Result<Vec<String>, SiteDbError> {
        self.host_to_cms_names(ce)
    }

    pub fn se_to_cms_name(&self, se: &str) -> Result<Vec<String>, SiteDbError> {
        self.host_to_cms_names(se)
    }

    /// PhEDEx nodes of the site called `cms_name`, `None` for an unknown
    /// name.
    pub fn cms_name_to_phedex_node(&self, cms_name: &str) -> Result<Option<Vec<String>>, SiteDbError> {
        let names = self.site_names(None, false)?;

        let site = match names
            .iter()
            .find(|row| is_type(row, "cms") && field(row, "alias") == Some(cms_name))
            .and_then(|row| field(row, "site_name"))
        {
            Some(site) => site,
            None => return Ok(None),
        };

        let nodes: Vec<Row> = names
            .iter()
            .filter(|row| is_type(row, "phedex") && field(row, "site_name") == Some(site))
            .cloned()
            .collect();
        Ok(Some(fields(&nodes, "alias")))
    }

    /// Legacy XML reports. Only `se_node_map.ini` is known.
    pub fn load_report(&self, report: &str) -> Result<String, SiteDbError> {
        if report != SE_NODE_MAP_REPORT {
            return Err(SiteDbError::Report(report.to_string()));
        }
        self.se_node_map_report()
    }

    /// `<result>` with one `<item>` per (PhEDEx node, SE) pair of every
    /// tiered site.
    pub fn se_node_map_report(&self) -> Result<String, SiteDbError> {
        let tiered = Regex::new("^T[0-3]_")?;
        let nodes: Vec<Row> = self
            .site_names(None, false)?
            .into_iter()
            .filter(|row| is_type(row, "phedex") && field(row, "alias").is_some_and(|a| tiered.is_match(a)))
            .collect();
        let ses: Vec<Row> = self
            .site_resources(false)?
            .into_iter()
            .filter(|row| is_type(row, "SE"))
            .collect();

        let mut writer = quick_xml::Writer::new(Vec::new());
        writer.write_event(Event::Start(BytesStart::new("result")))?;
        writer.get_mut().write_all(b"\n")?;

        let mut id = 0;
        for node in &nodes {
            let site = field(node, "site_name").unwrap_or_default();
            let alias = field(node, "alias").unwrap_or_default();

            for se in ses.iter().filter(|r| field(r, "site_name") == Some(site)) {
                let id_text = id.to_string();
                writer.write_event(Event::Start(BytesStart::new("item").with_attributes([("id", id_text.as_str())])))?;
                text_element(&mut writer, "name", site)?;
                text_element(&mut writer, "node", alias)?;
                text_element(&mut writer, "se", field(se, "fqdn").unwrap_or_default())?;
                writer.write_event(Event::End(BytesEnd::new("item")))?;
                id += 1;
            }
        }
        writer.write_event(Event::End(BytesEnd::new("result")))?;

        Ok(String::from_utf8_lossy(&writer.into_inner()).into_owned())
    }
}

fn text_element<W: Write>(writer: &mut quick_xml::Writer<W>, tag: &str, text: &str) -> Result<(), SiteDbError> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::HashMap;

    use super::*;

    // Canned replies per call, counting what was asked for
    struct Canned {
        replies: RefCell<HashMap<String, String>>,
        calls: RefCell<Vec<String>>,
    }

    impl Canned {
        fn new() -> Self {
            let mut replies = HashMap::new();
            replies.insert(
                "site-names".to_string(),
                r#"{"desc": {"columns": ["type", "site_name", "alias"]}, "result": [
                    ["cms", "RWTH", "T2_DE_RWTH"],
                    ["phedex", "RWTH", "T2_DE_RWTH"],
                    ["cms", "DESY", "T2_DE_DESY"],
                    ["phedex", "DESY", "T2_DE_DESY"],
                    ["cms", "FNAL", "T1_US_FNAL"],
                    ["phedex", "FNAL", "T1_US_FNAL_Buffer"],
                    ["phedex", "FNAL", "T1_US_FNAL_MSS"],
                    ["cms", "SHARED", "T3_US_Shared"],
                    ["psn", "FNAL", "T1_US_FNAL"]
                ]}"#
                .to_string(),
            );
            replies.insert(
                "site-resources".to_string(),
                r#"{"desc": {"columns": ["type", "site_name", "fqdn"]}, "result": [
                    ["SE", "RWTH", "grid-srm.physik.rwth-aachen.de"],
                    ["CE", "RWTH", "grid-ce.physik.rwth-aachen.de"],
                    ["SE", "DESY", "dcache-se-cms.desy.de"],
                    ["CE", "DESY", "grid-ce.desy.de"],
                    ["SE", "FNAL", "cmssrm.fnal.gov"],
                    ["CE", "FNAL", "cmsosgce.fnal.gov"],
                    ["SE", "SHARED", "cmssrm.fnal.gov"]
                ]}"#
                .to_string(),
            );
            replies.insert(
                "people".to_string(),
                r#"{"desc": {"columns": ["username", "dn"]}, "result": [
                    ["giffels", "/O=GermanGrid/OU=RWTH/CN=Manuel Giffels"],
                    ["other", "/DC=org/CN=Someone Else"]
                ]}"#
                .to_string(),
            );
            replies.insert(
                "group-responsibilities".to_string(),
                r#"{"desc": {"columns": ["username", "user_group", "role"]}, "result": [
                    ["giffels", "DataOps", "Operator"],
                    ["other", "DataOps", "Admin"],
                    ["giffels", "AnalysisOps", "Operator"]
                ]}"#
                .to_string(),
            );

            Canned {
                replies: RefCell::new(replies),
                calls: RefCell::new(Vec::new()),
            }
        }

        fn set(&self, call: &str, reply: &str) {
            self.replies.borrow_mut().insert(call.to_string(), reply.to_string());
        }

        fn count(&self, call: &str) -> usize {
            self.calls.borrow().iter().filter(|c| *c == call).count()
        }
    }

    impl Fetch for &Canned {
        fn fetch(&self, call: &str, _args: &[(&str, &str)]) -> Result<String, FetchError> {
            self.calls.borrow_mut().push(call.to_string());
            self.replies
                .borrow()
                .get(call)
                .cloned()
                .ok_or_else(|| FetchError::StatusError {
                    url: call.to_string(),
                    status: 404,
                })
        }
    }

    fn client<'a>(canned: &'a Canned, dir: &tempfile::TempDir) -> SiteDb<&'a Canned> {
        let cache = ResponseCache::new(dir.path(), Duration::from_secs(3600)).unwrap();
        SiteDb::new(canned, cache)
    }

    #[test]
    fn cms_name_pattern_to_hosts() {
        let canned = Canned::new();
        let dir = tempfile::tempdir().unwrap();
        let sitedb = client(&canned, &dir);

        let mut ses = sitedb.cms_name_to_se("%T2_DE").unwrap();
        ses.sort();
        assert_eq!(ses, vec!["dcache-se-cms.desy.de", "grid-srm.physik.rwth-aachen.de"]);

        assert_eq!(sitedb.cms_name_to_ce("T2_DE_RWTH").unwrap(), vec!["grid-ce.physik.rwth-aachen.de"]);
        assert_eq!(sitedb.cms_name_to_ce("T1*").unwrap(), vec!["cmsosgce.fnal.gov"]);
        assert!(sitedb.cms_name_to_ce("T0*").unwrap().is_empty());

        // Both calls were only fetched once
        assert_eq!(canned.count("site-names"), 1);
        assert_eq!(canned.count("site-resources"), 1);
    }

    #[test]
    fn pattern_is_anchored_at_start() {
        let re = site_pattern("T2_DE").unwrap();
        assert!(re.is_match("T2_DE_RWTH"));
        assert!(!re.is_match("XT2_DE_RWTH"));

        let re = site_pattern("%DE_RWTH").unwrap();
        assert!(re.is_match("T2_DE_RWTH"));
    }

    #[test]
    fn hosts_to_cms_names() {
        let canned = Canned::new();
        let dir = tempfile::tempdir().unwrap();
        let sitedb = client(&canned, &dir);

        assert_eq!(sitedb.se_to_cms_name("cmssrm.fnal.gov").unwrap(), vec!["T1_US_FNAL", "T3_US_Shared"]);
        assert_eq!(sitedb.ce_to_cms_name("grid-ce.desy.de").unwrap(), vec!["T2_DE_DESY"]);
        assert!(sitedb.se_to_cms_name("unknown.host").unwrap().is_empty());
    }

    #[test]
    fn all_names() {
        let canned = Canned::new();
        let dir = tempfile::tempdir().unwrap();
        let sitedb = client(&canned, &dir);

        assert_eq!(sitedb.all_ce_names().unwrap().len(), 3);
        assert_eq!(sitedb.all_se_names().unwrap().len(), 4);
        assert_eq!(
            sitedb.all_cms_names().unwrap(),
            vec!["T2_DE_RWTH", "T2_DE_DESY", "T1_US_FNAL", "T3_US_Shared"]
        );
    }

    #[test]
    fn phedex_nodes() {
        let canned = Canned::new();
        let dir = tempfile::tempdir().unwrap();
        let sitedb = client(&canned, &dir);

        assert_eq!(
            sitedb.cms_name_to_phedex_node("T1_US_FNAL").unwrap(),
            Some(vec!["T1_US_FNAL_Buffer".to_string(), "T1_US_FNAL_MSS".to_string()])
        );
        assert_eq!(sitedb.cms_name_to_phedex_node("T9_XX_Nowhere").unwrap(), None);

        assert_eq!(phedex_node_to_cms_name("T1_US_FNAL_Buffer"), "T1_US_FNAL");
        assert_eq!(phedex_node_to_cms_name("T1_US_FNAL_MSS"), "T1_US_FNAL");
        assert_eq!(phedex_node_to_cms_name("T0_CH_CERN_Export"), "T0_CH_CERN");
        assert_eq!(phedex_node_to_cms_name("T2_DE_RWTH"), "T2_DE_RWTH");
    }

    #[test]
    fn dn_to_user() {
        let canned = Canned::new();
        let dir = tempfile::tempdir().unwrap();
        let sitedb = client(&canned, &dir);

        assert_eq!(sitedb.dn_user_name("/O=GermanGrid/OU=RWTH/CN=Manuel Giffels").unwrap(), "giffels");

        let roles = sitedb.group_responsibilities("/O=GermanGrid/OU=RWTH/CN=Manuel Giffels").unwrap();
        assert_eq!(roles.len(), 2);
        assert!(roles.iter().all(|r| field(r, "username") == Some("giffels")));
    }

    #[test]
    fn unknown_dn_refetches_once() {
        let canned = Canned::new();
        let dir = tempfile::tempdir().unwrap();
        let sitedb = client(&canned, &dir);

        let err = sitedb.dn_user_name("/CN=Nobody").unwrap_err();
        assert!(matches!(err, SiteDbError::NotFound(_)));
        assert_eq!(canned.count("people"), 2);
    }

    #[test]
    fn new_registration_found_after_refetch() {
        let canned = Canned::new();
        let dir = tempfile::tempdir().unwrap();
        let sitedb = client(&canned, &dir);

        // Prime the cache, then the directory learns about a new person
        sitedb.people(None, false).unwrap();
        canned.set(
            "people",
            r#"{"desc": {"columns": ["username", "dn"]}, "result": [["newbie", "/CN=Newbie"]]}"#,
        );

        assert_eq!(sitedb.dn_user_name("/CN=Newbie").unwrap(), "newbie");
        assert_eq!(canned.count("people"), 2);
    }

    #[test]
    fn undecodable_reply_clears_cache() {
        let canned = Canned::new();
        canned.set("site-names", "<html>maintenance</html>");
        let dir = tempfile::tempdir().unwrap();
        let sitedb = client(&canned, &dir);

        let err = sitedb.all_cms_names().unwrap_err();
        assert!(matches!(err, SiteDbError::Parse { .. }));
        assert!(!dir.path().join(SITE_NAMES_FILE).exists());

        // Next call goes back to the service
        sitedb.all_cms_names().unwrap_err();
        assert_eq!(canned.count("site-names"), 2);
    }

    #[test]
    fn unreachable_call() {
        let canned = Canned::new();
        let dir = tempfile::tempdir().unwrap();
        let sitedb = client(&canned, &dir);

        let err = sitedb.get_json("no-such-call", "x.json", false, &[]).unwrap_err();
        assert_eq!(err.to_string(), "URL not available: no-such-call");
    }

    #[test]
    fn clear_cache_refetches_everything() {
        let canned = Canned::new();
        let dir = tempfile::tempdir().unwrap();
        let sitedb = client(&canned, &dir);

        sitedb.all_ce_names().unwrap();
        sitedb.all_cms_names().unwrap();
        sitedb.clear_cache().unwrap();
        sitedb.all_ce_names().unwrap();
        sitedb.all_cms_names().unwrap();

        assert_eq!(canned.count("site-resources"), 2);
        assert_eq!(canned.count("site-names"), 2);
    }

    #[test]
    fn people_by_username_uses_own_file() {
        let canned = Canned::new();
        let dir = tempfile::tempdir().unwrap();
        let sitedb = client(&canned, &dir);

        sitedb.people(Some("giffels"), false).unwrap();
        assert!(dir.path().join("people_giffels.json").exists());
    }

    #[test]
    fn se_node_map() {
        let canned = Canned::new();
        let dir = tempfile::tempdir().unwrap();
        let sitedb = client(&canned, &dir);

        let report = sitedb.load_report(SE_NODE_MAP_REPORT).unwrap();
        assert!(report.starts_with("<result>\n"));
        assert!(report.contains(
            r#"<item id="0"><name>RWTH</name><node>T2_DE_RWTH</node><se>grid-srm.physik.rwth-aachen.de</se></item>"#
        ));
        assert!(report.contains(
            r#"<item id="3"><name>FNAL</name><node>T1_US_FNAL_MSS</node><se>cmssrm.fnal.gov</se></item>"#
        ));
        assert!(!report.contains(r#"id="4""#));
        assert!(report.ends_with("</result>"));

        assert!(matches!(sitedb.load_report("other.ini"), Err(SiteDbError::Report(_))));
    }
}
