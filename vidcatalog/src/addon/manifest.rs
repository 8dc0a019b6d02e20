use serde::Serialize;

use super::{CATALOG_ID, CONTENT_TYPE};

/// Genre options offered by the catalog's filter.
pub const GENRES: &[&str] = &[
    "FILMES E SÉRIES",
    "ESPORTES",
    "NOTÍCIAS",
    "VARIEDADES",
    "INFANTIL",
    "DOCUMENTÁRIOS",
    "MÚSICA",
];

const ID: &str = "community.iptvbrasil.mastermind.online";
const NAME: &str = "Mastermind IPTV";
const DESCRIPTION: &str =
    "Se não estiver atualizado, mande listas m3u em gist para carvalhoclay@icloud.com";
const CATALOG_NAME: &str = "Vivo Fibra TV";
const ID_PREFIX: &str = "vf-";
const LOGO: &str = "https://i.imgur.com/DxrcqNW_d.webp?maxwidth=520&shape=thumb&fidelity=high";
const BACKGROUND: &str =
    "https://t.ctcdn.com.br/8DxJzUzINYD_PWZP1pi8BXISznA=/768x432/smart/i992757.jpeg";
const VERSION: &str = "1.1.0";

/**
    Static description of the addon, published at `/manifest.json`.

    Built once at startup and shared by every request.
*/
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddonManifest {
    pub id: &'static str,
    pub version: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub resources: Vec<&'static str>,
    pub types: Vec<&'static str>,
    pub catalogs: Vec<CatalogDescriptor>,
    pub id_prefixes: Vec<&'static str>,
    pub logo: &'static str,
    pub background: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct CatalogDescriptor {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub id: &'static str,
    pub name: &'static str,
    pub extra: Vec<ExtraDescriptor>,
}

/// An optional argument a client may pass when browsing a catalog.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtraDescriptor {
    pub name: &'static str,
    pub is_required: bool,
    pub options: Vec<&'static str>,
}

impl AddonManifest {
    pub fn new() -> Self {
        Self {
            id: ID,
            version: VERSION,
            name: NAME,
            description: DESCRIPTION,
            resources: vec!["stream", "catalog", "meta"],
            types: vec![CONTENT_TYPE],
            catalogs: vec![CatalogDescriptor {
                kind: CONTENT_TYPE,
                id: CATALOG_ID,
                name: CATALOG_NAME,
                extra: vec![ExtraDescriptor {
                    name: "genre",
                    is_required: false,
                    options: GENRES.to_vec(),
                }],
            }],
            id_prefixes: vec![ID_PREFIX],
            logo: LOGO,
            background: BACKGROUND,
        }
    }
}

impl Default for AddonManifest {
    fn default() -> Self {
        Self::new()
    }
}
