//! Cluster DRS rules.

use vim_wire::{
    abstract_type, array_element, base_accessor, wire_enum, wire_type, AnyType, DecodeError,
    EncodeError, StructReader, StructWriter, WireType,
};

use crate::data::ManagedObjectReference;

wire_enum! {
    pub enum ArrayUpdateOperation {
        Add = "add",
        Remove = "remove",
        Edit = "edit",
    }
}

wire_enum! {
    pub enum ManagedEntityStatus {
        Gray = "gray",
        Green = "green",
        Yellow = "yellow",
        Red = "red",
    }
}

pub trait BaseClusterRuleInfo {
    fn get_cluster_rule_info(&self) -> &ClusterRuleInfo;
    fn get_cluster_rule_info_mut(&mut self) -> &mut ClusterRuleInfo;
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClusterRuleInfo {
    pub key: Option<i32>,
    pub status: ManagedEntityStatus,
    pub enabled: Option<bool>,
    pub name: String,
    pub mandatory: Option<bool>,
    pub user_created: Option<bool>,
    pub in_compliance: Option<bool>,
    pub rule_uuid: String,
}

impl WireType for ClusterRuleInfo {
    fn write_fields(&self, w: &mut StructWriter<'_, '_>) -> Result<(), EncodeError> {
        w.field("key", &self.key)?;
        w.omit_empty("status", &self.status)?;
        w.field("enabled", &self.enabled)?;
        w.omit_empty("name", &self.name)?;
        w.field("mandatory", &self.mandatory)?;
        w.field("userCreated", &self.user_created)?;
        w.field("inCompliance", &self.in_compliance)?;
        w.omit_empty("ruleUuid", &self.rule_uuid)
    }

    fn read_fields(r: &mut StructReader<'_, '_, '_>) -> Result<Self, DecodeError> {
        Ok(Self {
            key: r.field("key")?,
            status: r.field("status")?,
            enabled: r.field("enabled")?,
            name: r.field("name")?,
            mandatory: r.field("mandatory")?,
            user_created: r.field("userCreated")?,
            in_compliance: r.field("inCompliance")?,
            rule_uuid: r.field("ruleUuid")?,
        })
    }
}

/// Keeps the listed virtual machines on the same host.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClusterAffinityRuleSpec {
    pub cluster_rule_info: ClusterRuleInfo,
    pub vm: Vec<ManagedObjectReference>,
}

impl WireType for ClusterAffinityRuleSpec {
    fn write_fields(&self, w: &mut StructWriter<'_, '_>) -> Result<(), EncodeError> {
        self.cluster_rule_info.write_fields(w)?;
        w.field("vm", &self.vm)
    }

    fn read_fields(r: &mut StructReader<'_, '_, '_>) -> Result<Self, DecodeError> {
        Ok(Self {
            cluster_rule_info: ClusterRuleInfo::read_fields(r)?,
            vm: r.field("vm")?,
        })
    }
}

/// Keeps the listed virtual machines on different hosts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClusterAntiAffinityRuleSpec {
    pub cluster_rule_info: ClusterRuleInfo,
    pub vm: Vec<ManagedObjectReference>,
}

impl WireType for ClusterAntiAffinityRuleSpec {
    fn write_fields(&self, w: &mut StructWriter<'_, '_>) -> Result<(), EncodeError> {
        self.cluster_rule_info.write_fields(w)?;
        w.field("vm", &self.vm)
    }

    fn read_fields(r: &mut StructReader<'_, '_, '_>) -> Result<Self, DecodeError> {
        Ok(Self {
            cluster_rule_info: ClusterRuleInfo::read_fields(r)?,
            vm: r.field("vm")?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClusterVmHostRuleInfo {
    pub cluster_rule_info: ClusterRuleInfo,
    pub vm_group_name: String,
    pub affine_host_group_name: String,
    pub anti_affine_host_group_name: String,
}

impl WireType for ClusterVmHostRuleInfo {
    fn write_fields(&self, w: &mut StructWriter<'_, '_>) -> Result<(), EncodeError> {
        self.cluster_rule_info.write_fields(w)?;
        w.omit_empty("vmGroupName", &self.vm_group_name)?;
        w.omit_empty("affineHostGroupName", &self.affine_host_group_name)?;
        w.omit_empty("antiAffineHostGroupName", &self.anti_affine_host_group_name)
    }

    fn read_fields(r: &mut StructReader<'_, '_, '_>) -> Result<Self, DecodeError> {
        Ok(Self {
            cluster_rule_info: ClusterRuleInfo::read_fields(r)?,
            vm_group_name: r.field("vmGroupName")?,
            affine_host_group_name: r.field("affineHostGroupName")?,
            anti_affine_host_group_name: r.field("antiAffineHostGroupName")?,
        })
    }
}

base_accessor!(BaseClusterRuleInfo::{get_cluster_rule_info, get_cluster_rule_info_mut} -> ClusterRuleInfo {
    ClusterRuleInfo => self;
    ClusterAffinityRuleSpec => self.cluster_rule_info;
    ClusterAntiAffinityRuleSpec => self.cluster_rule_info;
    ClusterVmHostRuleInfo => self.cluster_rule_info;
});

abstract_type! {
    /// Any cluster rule.
    pub enum ClusterRuleInfoKind: ClusterRuleInfo
        => BaseClusterRuleInfo::{get_cluster_rule_info, get_cluster_rule_info_mut}
    {
        ClusterRuleInfo,
        ClusterAffinityRuleSpec,
        ClusterAntiAffinityRuleSpec,
        ClusterVmHostRuleInfo,
    }
}

/// An add, edit or removal of one rule in a cluster reconfiguration.
/// Removals carry the rule key in `remove_key`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClusterRuleSpec {
    pub operation: ArrayUpdateOperation,
    pub remove_key: Option<AnyType>,
    pub info: Option<ClusterRuleInfoKind>,
}

impl ClusterRuleSpec {
    pub fn add(info: impl Into<ClusterRuleInfoKind>) -> Self {
        Self {
            operation: ArrayUpdateOperation::Add,
            remove_key: None,
            info: Some(info.into()),
        }
    }

    pub fn remove(key: i32) -> Self {
        Self {
            operation: ArrayUpdateOperation::Remove,
            remove_key: Some(AnyType::from(key)),
            info: None,
        }
    }
}

impl WireType for ClusterRuleSpec {
    fn write_fields(&self, w: &mut StructWriter<'_, '_>) -> Result<(), EncodeError> {
        w.field("operation", &self.operation)?;
        w.field("removeKey", &self.remove_key)?;
        w.field("info", &self.info)
    }

    fn read_fields(r: &mut StructReader<'_, '_, '_>) -> Result<Self, DecodeError> {
        Ok(Self {
            operation: r.field("operation")?,
            remove_key: r.field("removeKey")?,
            info: r.field("info")?,
        })
    }
}

wire_type!(
    ClusterRuleInfo,
    ClusterAffinityRuleSpec,
    ClusterAntiAffinityRuleSpec,
    ClusterVmHostRuleInfo,
    ClusterRuleSpec,
);

array_element!(ClusterRuleSpec);
