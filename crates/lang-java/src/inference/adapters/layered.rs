use super::jdk::JdkTypeSystem;
use super::local::LocalTypeIndex;
use crate::inference::{
    InheritanceProvider, MemberInfo, MemberProvider, TypeInfo, TypeProvider, TypeResolutionContext,
};
use varscope_api::models::TypeRef;

/// The unit's own types layered over the JDK table. Local declarations win.
pub struct LayeredTypeSystem<'a> {
    local: &'a LocalTypeIndex,
    jdk: &'static JdkTypeSystem,
}

impl<'a> LayeredTypeSystem<'a> {
    pub fn new(local: &'a LocalTypeIndex) -> Self {
        Self {
            local,
            jdk: JdkTypeSystem::shared(),
        }
    }

    pub fn local(&self) -> &'a LocalTypeIndex {
        self.local
    }

    fn is_local(&self, fqn: &str) -> bool {
        self.local.get_type_info(fqn).is_some()
    }
}

impl TypeProvider for LayeredTypeSystem<'_> {
    fn get_type_info(&self, fqn: &str) -> Option<TypeInfo> {
        self.local
            .get_type_info(fqn)
            .or_else(|| self.jdk.get_type_info(fqn))
    }

    fn resolve_type_name(&self, type_name: &str, ctx: &TypeResolutionContext) -> Option<String> {
        self.local.resolve_type_name(type_name, ctx)
    }
}

impl InheritanceProvider for LayeredTypeSystem<'_> {
    fn get_superclass(&self, fqn: &str) -> Option<TypeRef> {
        if self.is_local(fqn) {
            self.local.get_superclass(fqn)
        } else {
            self.jdk.get_superclass(fqn)
        }
    }

    fn get_interfaces(&self, fqn: &str) -> Vec<TypeRef> {
        if self.is_local(fqn) {
            self.local.get_interfaces(fqn)
        } else {
            self.jdk.get_interfaces(fqn)
        }
    }
}

impl MemberProvider for LayeredTypeSystem<'_> {
    fn get_members(&self, type_fqn: &str, member_name: &str) -> Vec<MemberInfo> {
        if self.is_local(type_fqn) {
            self.local.get_members(type_fqn, member_name)
        } else {
            self.jdk.get_members(type_fqn, member_name)
        }
    }

    fn get_all_members(&self, type_fqn: &str) -> Vec<MemberInfo> {
        if self.is_local(type_fqn) {
            self.local.get_all_members(type_fqn)
        } else {
            self.jdk.get_all_members(type_fqn)
        }
    }
}
