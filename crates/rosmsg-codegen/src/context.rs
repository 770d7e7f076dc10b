//! Package set assembly, filtering and ordering
//!
//! A [`CodeGenerationContext`] owns every discovered package and walks them
//! through parsing, filtering and ordering:
//!
//! ```text
//! add_package ─→ parse_messages ─→ apply_filter ─→ build_order
//!  Discovered     MessagesParsed     Filtered        Ordered
//! ```

use crate::error::{CodegenError, CodegenResult};
use crate::lifecycle::ContextState;
use crate::orderer::BuildOrderer;
use crate::parser::{ParsedPackage, parser_for};
use crate::registry::PackageRegistry;
use rosmsg_core::MessageTypeResolver;
use rosmsg_package::{PackageFilter, PackageFolder, PackageInfo, read_packages};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, error, info, warn};

/// A package selected for the build together with its parse result.
#[derive(Debug, Clone, PartialEq)]
pub struct CodeGenerationPackageContext {
    pub package: PackageInfo,
    pub parsed: ParsedPackage,
}

impl CodeGenerationPackageContext {
    pub fn new(package: PackageInfo, parsed: ParsedPackage) -> Self {
        Self { package, parsed }
    }

    pub fn name(&self) -> &str {
        &self.package.name
    }

    pub fn version(&self) -> &str {
        &self.package.version
    }

    /// Package names this package needs, as determined by its parser
    pub fn package_dependencies(&self) -> &BTreeSet<String> {
        &self.parsed.package_dependencies
    }

    /// Dependencies to publish with the generated package.
    ///
    /// Meta-packages list their manifest dependencies; concrete packages list
    /// the packages their message types actually reference.
    pub fn published_dependencies(&self) -> Vec<String> {
        if self.package.is_meta_package {
            self.package.package_dependencies.clone()
        } else {
            self.parsed.package_dependencies.iter().cloned().collect()
        }
    }
}

/// Owns the package set of one code generation run.
#[derive(Debug, Default)]
pub struct CodeGenerationContext {
    available: Vec<PackageInfo>,
    parsed: BTreeMap<String, ParsedPackage>,
    failures: BTreeMap<String, CodegenError>,
    packages: Vec<CodeGenerationPackageContext>,
    registry: PackageRegistry,
    orderer: BuildOrderer,
    state: ContextState,
}

impl CodeGenerationContext {
    /// Create a context from discovered packages. Names must be unique.
    pub fn new(packages: impl IntoIterator<Item = PackageInfo>) -> CodegenResult<Self> {
        let mut context = Self::default();

        for package in packages {
            context.add_package(package)?;
        }

        Ok(context)
    }

    /// Read the packages of `folders` and create a context from them.
    ///
    /// Later folders holding an already seen package name are ignored;
    /// unreadable optional folders are skipped.
    pub fn from_folders(folders: &[PackageFolder]) -> CodegenResult<Self> {
        Self::new(read_packages(folders)?)
    }

    /// Add a package. Any parsed, filtered or ordered state is invalidated.
    pub fn add_package(&mut self, package: PackageInfo) -> CodegenResult<()> {
        if self.available.iter().any(|p| p.name == package.name) {
            return Err(CodegenError::DuplicatePackage(package.name));
        }

        debug!(
            package = %package.name,
            version = %package.version,
            optional = package.is_optional,
            meta = package.is_meta_package,
            "Added package"
        );

        self.available.push(package);
        self.packages.clear();
        self.set_state(ContextState::Discovered);
        Ok(())
    }

    pub fn state(&self) -> ContextState {
        self.state
    }

    /// Every package known to this context
    pub fn available_packages(&self) -> &[PackageInfo] {
        &self.available
    }

    /// Packages selected for the build, in discovery order
    pub fn packages(&self) -> &[CodeGenerationPackageContext] {
        &self.packages
    }

    pub fn registry(&self) -> &PackageRegistry {
        &self.registry
    }

    /// Parse result of an available package
    pub fn parsed(&self, package_name: &str) -> Option<&ParsedPackage> {
        self.parsed.get(package_name)
    }

    /// Parse every available package that has not been parsed yet.
    ///
    /// A package that fails to parse is held back with a warning. Its error
    /// is returned by [`apply_filter`](Self::apply_filter) once the package
    /// is selected for the build; otherwise it is skipped.
    pub fn parse_messages(&mut self) -> CodegenResult<()> {
        if self.state.has_parsed_messages() {
            return Ok(());
        }

        for package in &self.available {
            if self.parsed.contains_key(&package.name) {
                continue;
            }

            match parser_for(package).parse(package) {
                Ok(parsed) => {
                    for dependency in &parsed.package_dependencies {
                        self.registry.add_dependency(dependency);
                    }
                    self.failures.remove(&package.name);
                    self.parsed.insert(package.name.clone(), parsed);
                }
                Err(e) => {
                    warn!(
                        package = %package.name,
                        optional = package.is_optional,
                        error = %e,
                        "Could not parse package, skipping it unless required"
                    );
                    self.failures.insert(package.name.clone(), e);
                }
            }
        }

        self.set_state(ContextState::MessagesParsed);
        Ok(())
    }

    /// Names of packages that failed to parse
    pub fn unparsed_packages(&self) -> impl Iterator<Item = &str> {
        self.failures.keys().map(String::as_str)
    }

    /// Select the mandatory packages.
    ///
    /// Packages matching `filter` are mandatory (an empty filter keeps the
    /// current classification). Every available package a mandatory package
    /// depends on is added until no selected package misses a dependency.
    ///
    /// Selecting a package that failed to parse returns its parse error and
    /// resets the context to [`ContextState::Discovered`].
    pub fn apply_filter(&mut self, filter: &PackageFilter) -> CodegenResult<()> {
        if !self.state.has_parsed_messages() {
            return Err(CodegenError::InvalidState {
                expected: ContextState::MessagesParsed,
                actual: self.state,
            });
        }

        for name in filter.exact_names() {
            if !self.available.iter().any(|p| p.name == name) {
                return Err(CodegenError::MissingPackage(name.to_string()));
            }
        }

        self.available = filter.reclassify(&self.available);

        let mut selected: BTreeSet<String> = self
            .available
            .iter()
            .filter(|p| !p.is_optional)
            .map(|p| p.name.clone())
            .collect();

        let mut pending: Vec<String> = selected.iter().cloned().collect();
        while let Some(name) = pending.pop() {
            if let Some(e) = self.failures.remove(&name) {
                error!(package = %name, error = %e, "Required package could not be parsed");
                self.packages.clear();
                self.set_state(ContextState::Discovered);
                return Err(e);
            }

            let Some(parsed) = self.parsed.get(&name) else {
                continue;
            };

            for dependency in &parsed.package_dependencies {
                let known =
                    self.parsed.contains_key(dependency) || self.failures.contains_key(dependency);
                if known && selected.insert(dependency.clone()) {
                    debug!(package = %dependency, required_by = %name, "Including required package");
                    pending.push(dependency.clone());
                }
            }
        }

        self.packages = self
            .available
            .iter()
            .filter(|p| selected.contains(&p.name))
            .map(|p| {
                let parsed = self
                    .parsed
                    .get(&p.name)
                    .cloned()
                    .unwrap_or_else(|| ParsedPackage::new(&p.name));
                CodeGenerationPackageContext::new(p.clone().with_optional(false), parsed)
            })
            .collect();

        for package in &self.packages {
            self.registry.mark_in_build_pipeline(&package.package.name);
        }

        let external: Vec<&str> = self.registry.external().collect();
        if !external.is_empty() {
            debug!(packages = ?external, "Referenced packages outside the build set");
        }

        info!(
            selected = self.packages.len(),
            available = self.available.len(),
            "Filtered packages"
        );

        self.set_state(ContextState::Filtered);
        Ok(())
    }

    /// Selected packages in build order.
    pub fn build_order(&mut self) -> CodegenResult<Vec<&CodeGenerationPackageContext>> {
        if !self.state.can_order() {
            return Err(CodegenError::InvalidState {
                expected: ContextState::Filtered,
                actual: self.state,
            });
        }

        let order = self.orderer.packages(&self.packages)?;
        self.state = ContextState::Ordered;
        Ok(order)
    }

    /// A resolver holding the message types of every parsed package.
    pub fn type_resolver(&self) -> CodegenResult<MessageTypeResolver> {
        if !self.state.has_parsed_messages() {
            return Err(CodegenError::InvalidState {
                expected: ContextState::MessagesParsed,
                actual: self.state,
            });
        }

        let mut resolver = MessageTypeResolver::new();
        for parsed in self.parsed.values() {
            for message in &parsed.messages {
                resolver.add(message.type_ref.clone(), message.descriptor.clone())?;
            }
        }

        Ok(resolver)
    }

    fn set_state(&mut self, state: ContextState) {
        if self.state != state && !self.state.can_transition_to(state) {
            debug!(from = %self.state, to = %state, "Unexpected context state change");
        }
        self.state = state;
    }
}
