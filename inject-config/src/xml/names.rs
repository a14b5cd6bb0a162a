//! Element and attribute names.

pub const CONTAINER: &str = "container";
pub const ALIAS: &str = "alias";
pub const REGISTER: &str = "register";
pub const CONSTRUCTOR: &str = "constructor";
pub const METHOD: &str = "method";
pub const PARAM: &str = "param";
pub const DEPENDENCY: &str = "dependency";
pub const OPTIONAL: &str = "optional";
pub const VALUE: &str = "value";

pub const NAME: &str = "name";
pub const TYPE: &str = "type";
pub const MAP_TO: &str = "mapTo";
pub const DEPENDENCY_NAME: &str = "dependencyName";
pub const DEPENDENCY_TYPE: &str = "dependencyType";
