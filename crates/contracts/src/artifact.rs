//! Lookup of Hardhat build artifacts by contract name.
//!
//! Hardhat writes one JSON file per compiled contract to
//! `artifacts/<sourceName>/<contractName>.json`, next to a `.dbg.json` file
//! and a `build-info/` directory shared by the whole compilation. Only the
//! per-contract files are of interest here.

use {
    alloy::{json_abi::JsonAbi, primitives::Bytes},
    serde::Deserialize,
    std::{
        collections::BTreeMap,
        fs,
        path::{Path, PathBuf},
    },
};

const BUILD_INFO_DIR: &str = "build-info";

#[derive(Debug, thiserror::Error)]
pub enum ResolutionError {
    #[error("artifact for contract {name:?} not found in {}", root.display())]
    NotFound { name: String, root: PathBuf },
    #[error(
        "there are multiple artifacts for contract {name:?}, use one of the fully qualified \
         names instead: {}",
        candidates.join(", ")
    )]
    Ambiguous {
        name: String,
        candidates: Vec<String>,
    },
    #[error("could not read {}", path.display())]
    Unreadable {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("artifact {} is malformed", path.display())]
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("contract {name} has invalid bytecode")]
    InvalidBytecode {
        name: String,
        source: alloy::primitives::hex::FromHexError,
    },
    #[error("contract {name} is abstract and can't be deployed")]
    NotDeployable { name: String },
    #[error("contract {name} needs to be linked against the libraries {}", libraries.join(", "))]
    UnlinkedLibraries {
        name: String,
        libraries: Vec<String>,
    },
}

/// The parts of a Hardhat artifact needed to deploy a contract.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    pub contract_name: String,
    pub source_name: String,
    #[serde(default)]
    pub abi: JsonAbi,
    /// Creation bytecode. Kept as a string because unlinked bytecode contains
    /// `__$<hash>$__` placeholders that are not valid hex.
    pub bytecode: String,
    /// `sourceName -> libraryName -> offsets`
    #[serde(default)]
    pub link_references: BTreeMap<String, BTreeMap<String, serde_json::Value>>,
}

impl Artifact {
    /// `sourceName:contractName`, unique within one project.
    pub fn fully_qualified_name(&self) -> String {
        format!("{}:{}", self.source_name, self.contract_name)
    }

    /// Number of arguments the constructor expects.
    pub fn constructor_inputs(&self) -> usize {
        self.abi
            .constructor()
            .map(|constructor| constructor.inputs.len())
            .unwrap_or_default()
    }

    /// Returns the code to send in a contract creation transaction.
    pub fn creation_code(&self) -> Result<Bytes, ResolutionError> {
        let libraries: Vec<String> = self
            .link_references
            .iter()
            .flat_map(|(source, libraries)| {
                libraries
                    .keys()
                    .map(move |library| format!("{source}:{library}"))
            })
            .collect();
        if !libraries.is_empty() {
            return Err(ResolutionError::UnlinkedLibraries {
                name: self.contract_name.clone(),
                libraries,
            });
        }

        let code = alloy::primitives::hex::decode(self.bytecode.trim()).map_err(|source| {
            ResolutionError::InvalidBytecode {
                name: self.contract_name.clone(),
                source,
            }
        })?;
        if code.is_empty() {
            return Err(ResolutionError::NotDeployable {
                name: self.contract_name.clone(),
            });
        }
        Ok(code.into())
    }
}

/// Directory containing the artifacts of a compiled project.
#[derive(Debug, Clone)]
pub struct Artifacts {
    root: PathBuf,
}

impl Artifacts {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Finds the artifact of a contract given either its bare name
    /// (`Leozuki`) or its fully qualified name (`contracts/Leozuki.sol:Leozuki`).
    pub fn resolve(&self, name: &str) -> Result<Artifact, ResolutionError> {
        let (source_name, contract_name) = match name.rsplit_once(':') {
            Some((source, contract)) => (Some(source), contract),
            None => (None, name),
        };

        if let Some(source_name) = source_name {
            return self.resolve_qualified(name, source_name, contract_name);
        }

        let mut paths = Vec::new();
        collect_candidates(&self.root, contract_name, &mut paths)?;
        paths.sort();

        let mut matching = paths
            .iter()
            .map(|path| load(path))
            .filter(|artifact| match artifact {
                Ok(artifact) => artifact.contract_name == contract_name,
                Err(_) => true,
            })
            .collect::<Result<Vec<_>, _>>()?;

        match matching.len() {
            0 => Err(ResolutionError::NotFound {
                name: name.to_owned(),
                root: self.root.clone(),
            }),
            1 => Ok(matching.remove(0)),
            _ => Err(ResolutionError::Ambiguous {
                name: name.to_owned(),
                candidates: matching
                    .iter()
                    .map(Artifact::fully_qualified_name)
                    .collect(),
            }),
        }
    }

    /// Fully qualified names map to exactly one file,
    /// `<root>/<sourceName>/<contractName>.json`.
    fn resolve_qualified(
        &self,
        name: &str,
        source_name: &str,
        contract_name: &str,
    ) -> Result<Artifact, ResolutionError> {
        let not_found = || ResolutionError::NotFound {
            name: name.to_owned(),
            root: self.root.clone(),
        };

        let path = self
            .root
            .join(source_name)
            .join(format!("{contract_name}.json"));
        let artifact = match load(&path) {
            Err(ResolutionError::Unreadable { source, .. })
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                return Err(not_found());
            }
            result => result?,
        };

        if artifact.contract_name != contract_name || artifact.source_name != source_name {
            return Err(not_found());
        }
        Ok(artifact)
    }
}

fn collect_candidates(
    dir: &Path,
    contract_name: &str,
    out: &mut Vec<PathBuf>,
) -> Result<(), ResolutionError> {
    let unreadable = |source| ResolutionError::Unreadable {
        path: dir.to_owned(),
        source,
    };

    for entry in fs::read_dir(dir).map_err(unreadable)? {
        let entry = entry.map_err(unreadable)?;
        let file_type = entry.file_type().map_err(unreadable)?;
        let path = entry.path();
        if file_type.is_symlink() && path.is_dir() {
            // Symlinked directories may form cycles.
            tracing::debug!(path = %path.display(), "skipping symlinked directory");
            continue;
        }
        if file_type.is_dir() {
            if path.file_name().is_some_and(|name| name == BUILD_INFO_DIR) {
                continue;
            }
            collect_candidates(&path, contract_name, out)?;
        } else if path.extension().is_some_and(|ext| ext == "json")
            // `Name.dbg.json` has the stem `Name.dbg` and is skipped here.
            && path.file_stem().is_some_and(|stem| stem == contract_name)
        {
            out.push(path);
        }
    }
    Ok(())
}

fn load(path: &Path) -> Result<Artifact, ResolutionError> {
    let content = fs::read_to_string(path).map_err(|source| ResolutionError::Unreadable {
        path: path.to_owned(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| ResolutionError::Malformed {
        path: path.to_owned(),
        source,
    })
}
