//! Generated vim25 wire types and the registry built from them.
//!
//! [`registry()`] is the process-wide catalog, built once on first use. The
//! `to_*` / `from_*` helpers bind the `vim-wire` codecs to it.

pub mod cluster;
pub mod config_spec;
pub mod data;
pub mod device;
pub mod hardware_version;
pub mod resource_pool;

use std::sync::OnceLock;

use vim_wire::{
    ArrayOf, CopyError, Decode, DecodeError, Encode, EncodeError, Registry, RegistryBuilder,
    RegistryError,
};

pub use cluster::*;
pub use config_spec::*;
pub use data::*;
pub use device::*;
pub use hardware_version::{HardwareVersion, HardwareVersionError};
pub use resource_pool::*;

/// Builds a registry holding every type of this catalog plus the primitive
/// array wrappers.
pub fn build_registry() -> Result<Registry, RegistryError> {
    let mut builder = RegistryBuilder::with_builtins();
    register_all(&mut builder)?;
    let registry = builder.build();
    log::debug!("vim25 catalog registered {} wire types", registry.len());
    Ok(registry)
}

fn register_all(b: &mut RegistryBuilder) -> Result<(), RegistryError> {
    b.register::<ManagedObjectReference>()?
        .register::<ArrayOf<ManagedObjectReference>>()?
        .register::<Description>()?
        .register::<OptionValue>()?
        .register::<ArrayOf<OptionValue>>()?
        .register::<DynamicProperty>()?
        .register::<KeyAnyValue>()?;

    b.register::<VirtualDeviceBackingInfo>()?
        .register::<VirtualDeviceFileBackingInfo>()?
        .register::<VirtualDiskFlatVer2BackingInfo>()?
        .register::<VirtualDeviceDeviceBackingInfo>()?
        .register::<VirtualEthernetCardNetworkBackingInfo>()?
        .register::<VirtualDeviceConnectInfo>()?
        .register::<VirtualDevice>()?
        .register::<ArrayOf<VirtualDeviceKind>>()?
        .register::<VirtualController>()?
        .register::<VirtualSCSIController>()?
        .register::<VirtualLsiLogicController>()?
        .register::<ParaVirtualSCSIController>()?
        .register::<VirtualDisk>()?
        .register::<VirtualEthernetCard>()?
        .register::<VirtualE1000>()?
        .register::<VirtualVmxnet>()?
        .register::<VirtualVmxnet3>()?;

    b.register::<VirtualDeviceConfigSpec>()?
        .register::<VirtualDiskConfigSpec>()?
        .register::<ArrayOf<VirtualDeviceConfigSpecKind>>()?
        .register::<VirtualMachineFileInfo>()?
        .register::<VirtualMachineAffinityInfo>()?
        .register::<VirtualMachineConfigSpec>()?;

    b.register::<ClusterRuleInfo>()?
        .register::<ClusterAffinityRuleSpec>()?
        .register::<ClusterAntiAffinityRuleSpec>()?
        .register::<ClusterVmHostRuleInfo>()?
        .register::<ArrayOf<ClusterRuleInfoKind>>()?
        .register::<ClusterRuleSpec>()?
        .register::<ArrayOf<ClusterRuleSpec>>()?;

    b.register::<ResourcePoolRuntimeInfo>()?
        .register::<ResourcePoolResourceUsage>()?
        .register::<ResourcePoolVmResourceProfileUsage>()?
        .register::<ArrayOf<ResourcePoolVmResourceProfileUsage>>()?;
    Ok(())
}

static REGISTRY: OnceLock<Registry> = OnceLock::new();

/// The process-wide catalog registry.
pub fn registry() -> &'static Registry {
    REGISTRY.get_or_init(|| match build_registry() {
        Ok(registry) => registry,
        // The catalog is static: a clash here is a bug in this crate.
        Err(err) => panic!("invalid vim25 catalog: {err}"),
    })
}

pub fn to_json<T: Encode + ?Sized>(value: &T) -> Result<String, EncodeError> {
    vim_wire::json::to_string(value, registry())
}

pub fn to_json_pretty<T: Encode + ?Sized>(value: &T) -> Result<String, EncodeError> {
    vim_wire::json::to_string_pretty(value, registry())
}

pub fn from_json<T: Decode>(text: &str) -> Result<T, DecodeError> {
    vim_wire::json::from_str(text, registry())
}

pub fn to_xml<T: Encode + ?Sized>(value: &T) -> Result<String, EncodeError> {
    vim_wire::xml::to_string(value, registry())
}

pub fn from_xml<T: Decode>(xml: &str) -> Result<T, DecodeError> {
    vim_wire::xml::from_str(xml, registry())
}

pub fn deep_copy<T: Encode + Decode>(value: &T) -> Result<T, CopyError> {
    vim_wire::deep_copy(value, registry())
}

pub fn must_deep_copy<T: Encode + Decode>(value: &T) -> T {
    vim_wire::must_deep_copy(value, registry())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_builds_without_clashes() {
        let registry = build_registry().unwrap();
        assert!(registry.contains("VirtualVmxnet3"));
        assert!(registry.contains("ArrayOfClusterRuleInfo"));
        assert!(registry.contains("ArrayOfManagedObjectReference"));
        assert!(registry.contains("ArrayOfInt"));
        assert!(!registry.contains("ResourcePoolRuntimeInfoEx"));
    }

    #[test]
    fn shared_registry_is_built_once() {
        assert!(std::ptr::eq(registry(), registry()));
    }
}
