// Message table for the semantic core.
//
// Coded entries are standalone diagnostics; the `message_chain` templates are
// only used to elaborate a failed type comparison under a coded head message.

use super::{DiagnosticCategory, DiagnosticMessage};

pub mod diagnostic_codes {
    pub const DUPLICATE_IDENTIFIER: u32 = 2300;
    pub const CANNOT_FIND_NAME: u32 = 2304;
    pub const MODULE_HAS_NO_EXPORTED_MEMBER: u32 = 2305;
    pub const TYPE_RECURSIVELY_REFERENCES_ITSELF_AS_A_BASE_TYPE: u32 = 2310;
    pub const A_CLASS_MAY_ONLY_EXTEND_ANOTHER_CLASS: u32 = 2311;
    pub const AN_INTERFACE_MAY_ONLY_EXTEND_A_CLASS_OR_ANOTHER_INTERFACE: u32 = 2312;
    pub const GENERIC_TYPE_REQUIRES_TYPE_ARGUMENTS: u32 = 2314;
    pub const TYPE_IS_NOT_GENERIC: u32 = 2315;
    pub const TYPE_IS_NOT_ASSIGNABLE_TO_TYPE: u32 = 2322;
    pub const PROPERTY_IS_MISSING_IN_TYPE: u32 = 2324;
    pub const TYPES_OF_PROPERTY_ARE_INCOMPATIBLE: u32 = 2326;
    pub const THIS_CANNOT_BE_REFERENCED_IN_CURRENT_LOCATION: u32 = 2332;
    pub const SUPER_CAN_ONLY_BE_REFERENCED_IN_A_DERIVED_CLASS: u32 = 2335;
    pub const SUPER_CALLS_ARE_NOT_PERMITTED_OUTSIDE_CONSTRUCTORS: u32 = 2337;
    pub const PROPERTY_DOES_NOT_EXIST_ON_TYPE: u32 = 2339;
    pub const PROPERTY_IS_PRIVATE_AND_ONLY_ACCESSIBLE_WITHIN_CLASS: u32 = 2341;
    pub const AN_INDEX_EXPRESSION_ARGUMENT_MUST_BE_OF_TYPE_STRING_NUMBER_OR_ANY: u32 = 2342;
    pub const TYPE_DOES_NOT_SATISFY_THE_CONSTRAINT: u32 = 2344;
    pub const ARGUMENT_OF_TYPE_IS_NOT_ASSIGNABLE_TO_PARAMETER_OF_TYPE: u32 = 2345;
    pub const SUPPLIED_PARAMETERS_DO_NOT_MATCH_ANY_SIGNATURE_OF_CALL_TARGET: u32 = 2346;
    pub const UNTYPED_FUNCTION_CALLS_MAY_NOT_ACCEPT_TYPE_ARGUMENTS: u32 = 2347;
    pub const VALUE_OF_TYPE_IS_NOT_CALLABLE_DID_YOU_MEAN_TO_INCLUDE_NEW: u32 = 2348;
    pub const CANNOT_INVOKE_AN_EXPRESSION_WHOSE_TYPE_LACKS_A_CALL_SIGNATURE: u32 = 2349;
    pub const CANNOT_USE_NEW_WITH_AN_EXPRESSION_WHOSE_TYPE_LACKS_A_CONSTRUCT_SIGNATURE: u32 = 2351;
    pub const NEITHER_TYPE_IS_ASSIGNABLE_TO_THE_OTHER: u32 = 2352;
    pub const A_FUNCTION_WHOSE_DECLARED_TYPE_IS_NEITHER_VOID_NOR_ANY_MUST_RETURN_A_VALUE: u32 = 2355;
    pub const AN_ARITHMETIC_OPERAND_MUST_BE_OF_TYPE_ANY_NUMBER_OR_AN_ENUM_TYPE: u32 = 2356;
    pub const THE_OPERAND_OF_AN_INCREMENT_OR_DECREMENT_OPERATOR_MUST_BE_A_VARIABLE_OR_PROPERTY: u32 = 2357;
    pub const THE_LEFT_HAND_SIDE_OF_AN_INSTANCEOF_EXPRESSION_MUST_BE_OF_TYPE_ANY_OR_AN_OBJECT_TYPE: u32 = 2358;
    pub const THE_LEFT_HAND_SIDE_OF_AN_ARITHMETIC_OPERATION_MUST_BE_OF_TYPE_ANY_NUMBER_OR_AN_ENUM_TYPE: u32 = 2362;
    pub const THE_RIGHT_HAND_SIDE_OF_AN_ARITHMETIC_OPERATION_MUST_BE_OF_TYPE_ANY_NUMBER_OR_AN_ENUM_TYPE: u32 = 2363;
    pub const THE_LEFT_HAND_SIDE_OF_AN_ASSIGNMENT_EXPRESSION_MUST_BE_A_VARIABLE_OR_A_PROPERTY_ACCESS: u32 = 2364;
    pub const OPERATOR_CANNOT_BE_APPLIED_TO_TYPES: u32 = 2365;
    pub const A_REST_PARAMETER_MUST_BE_OF_AN_ARRAY_TYPE: u32 = 2370;
    pub const CONSTRUCTORS_FOR_DERIVED_CLASSES_MUST_CONTAIN_A_SUPER_CALL: u32 = 2377;
    pub const FUNCTION_IMPLEMENTATION_IS_MISSING_OR_NOT_IMMEDIATELY_FOLLOWING_THE_DECLARATION: u32 = 2391;
    pub const OVERLOAD_SIGNATURE_IS_NOT_COMPATIBLE_WITH_FUNCTION_IMPLEMENTATION: u32 = 2394;
    pub const SUBSEQUENT_VARIABLE_DECLARATIONS_MUST_HAVE_THE_SAME_TYPE: u32 = 2403;
    pub const PROPERTY_OF_TYPE_IS_NOT_ASSIGNABLE_TO_STRING_INDEX_TYPE: u32 = 2411;
    pub const NUMERIC_INDEX_TYPE_IS_NOT_ASSIGNABLE_TO_STRING_INDEX_TYPE: u32 = 2413;
    pub const CLASS_INCORRECTLY_EXTENDS_BASE_CLASS: u32 = 2415;
    pub const CLASS_INCORRECTLY_IMPLEMENTS_INTERFACE: u32 = 2420;
    pub const A_CLASS_MAY_ONLY_IMPLEMENT_ANOTHER_CLASS_OR_INTERFACE: u32 = 2422;
    pub const INTERFACE_INCORRECTLY_EXTENDS_INTERFACE: u32 = 2430;
    pub const TYPE_ALIAS_CIRCULARLY_REFERENCES_ITSELF: u32 = 2456;
    pub const EXPECTED_TYPE_ARGUMENTS_BUT_GOT: u32 = 2558;
    pub const VARIABLE_IMPLICITLY_HAS_AN_TYPE: u32 = 7005;
    pub const PARAMETER_IMPLICITLY_HAS_AN_TYPE: u32 = 7006;
    pub const MEMBER_IMPLICITLY_HAS_AN_TYPE: u32 = 7008;
    pub const WHICH_LACKS_RETURN_TYPE_ANNOTATION_IMPLICITLY_HAS_AN_RETURN_TYPE: u32 = 7010;
    pub const ARRAY_LITERAL_IMPLICITLY_HAS_AN_ANY_TYPE_FROM_WIDENING: u32 = 7015;
    pub const WAS_ALSO_DECLARED_HERE: u32 = 6203;
}

pub mod diagnostic_messages {
    pub const DUPLICATE_IDENTIFIER: &str =
        "Duplicate identifier '{0}'.";
    pub const CANNOT_FIND_NAME: &str =
        "Cannot find name '{0}'.";
    pub const MODULE_HAS_NO_EXPORTED_MEMBER: &str =
        "Module '{0}' has no exported member '{1}'.";
    pub const TYPE_RECURSIVELY_REFERENCES_ITSELF_AS_A_BASE_TYPE: &str =
        "Type '{0}' recursively references itself as a base type.";
    pub const A_CLASS_MAY_ONLY_EXTEND_ANOTHER_CLASS: &str =
        "A class may only extend another class.";
    pub const AN_INTERFACE_MAY_ONLY_EXTEND_A_CLASS_OR_ANOTHER_INTERFACE: &str =
        "An interface may only extend a class or another interface.";
    pub const GENERIC_TYPE_REQUIRES_TYPE_ARGUMENTS: &str =
        "Generic type '{0}' requires {1} type argument(s).";
    pub const TYPE_IS_NOT_GENERIC: &str =
        "Type '{0}' is not generic.";
    pub const TYPE_IS_NOT_ASSIGNABLE_TO_TYPE: &str =
        "Type '{0}' is not assignable to type '{1}'.";
    pub const PROPERTY_IS_MISSING_IN_TYPE: &str =
        "Property '{0}' is missing in type '{1}'.";
    pub const TYPES_OF_PROPERTY_ARE_INCOMPATIBLE: &str =
        "Types of property '{0}' are incompatible.";
    pub const THIS_CANNOT_BE_REFERENCED_IN_CURRENT_LOCATION: &str =
        "'this' cannot be referenced in current location.";
    pub const SUPER_CAN_ONLY_BE_REFERENCED_IN_A_DERIVED_CLASS: &str =
        "'super' can only be referenced in a derived class.";
    pub const SUPER_CALLS_ARE_NOT_PERMITTED_OUTSIDE_CONSTRUCTORS: &str =
        "Super calls are not permitted outside constructors or in nested functions inside constructors.";
    pub const PROPERTY_DOES_NOT_EXIST_ON_TYPE: &str =
        "Property '{0}' does not exist on type '{1}'.";
    pub const PROPERTY_IS_PRIVATE_AND_ONLY_ACCESSIBLE_WITHIN_CLASS: &str =
        "Property '{0}' is private and only accessible within class '{1}'.";
    pub const AN_INDEX_EXPRESSION_ARGUMENT_MUST_BE_OF_TYPE_STRING_NUMBER_OR_ANY: &str =
        "An index expression argument must be of type 'string', 'number', or 'any'.";
    pub const TYPE_DOES_NOT_SATISFY_THE_CONSTRAINT: &str =
        "Type '{0}' does not satisfy the constraint '{1}'.";
    pub const ARGUMENT_OF_TYPE_IS_NOT_ASSIGNABLE_TO_PARAMETER_OF_TYPE: &str =
        "Argument of type '{0}' is not assignable to parameter of type '{1}'.";
    pub const SUPPLIED_PARAMETERS_DO_NOT_MATCH_ANY_SIGNATURE_OF_CALL_TARGET: &str =
        "Supplied parameters do not match any signature of call target.";
    pub const UNTYPED_FUNCTION_CALLS_MAY_NOT_ACCEPT_TYPE_ARGUMENTS: &str =
        "Untyped function calls may not accept type arguments.";
    pub const VALUE_OF_TYPE_IS_NOT_CALLABLE_DID_YOU_MEAN_TO_INCLUDE_NEW: &str =
        "Value of type '{0}' is not callable. Did you mean to include 'new'?";
    pub const CANNOT_INVOKE_AN_EXPRESSION_WHOSE_TYPE_LACKS_A_CALL_SIGNATURE: &str =
        "Cannot invoke an expression whose type lacks a call signature.";
    pub const CANNOT_USE_NEW_WITH_AN_EXPRESSION_WHOSE_TYPE_LACKS_A_CONSTRUCT_SIGNATURE: &str =
        "Cannot use 'new' with an expression whose type lacks a call or construct signature.";
    pub const NEITHER_TYPE_IS_ASSIGNABLE_TO_THE_OTHER: &str =
        "Neither type '{0}' nor type '{1}' is assignable to the other.";
    pub const A_FUNCTION_WHOSE_DECLARED_TYPE_IS_NEITHER_VOID_NOR_ANY_MUST_RETURN_A_VALUE: &str =
        "A function whose declared type is neither 'void' nor 'any' must return a value.";
    pub const AN_ARITHMETIC_OPERAND_MUST_BE_OF_TYPE_ANY_NUMBER_OR_AN_ENUM_TYPE: &str =
        "An arithmetic operand must be of type 'any', 'number' or an enum type.";
    pub const THE_OPERAND_OF_AN_INCREMENT_OR_DECREMENT_OPERATOR_MUST_BE_A_VARIABLE_OR_PROPERTY: &str =
        "The operand of an increment or decrement operator must be a variable, property or indexer.";
    pub const THE_LEFT_HAND_SIDE_OF_AN_INSTANCEOF_EXPRESSION_MUST_BE_OF_TYPE_ANY_OR_AN_OBJECT_TYPE: &str =
        "The left-hand side of an 'instanceof' expression must be of type 'any', an object type or a type parameter.";
    pub const THE_LEFT_HAND_SIDE_OF_AN_ARITHMETIC_OPERATION_MUST_BE_OF_TYPE_ANY_NUMBER_OR_AN_ENUM_TYPE: &str =
        "The left-hand side of an arithmetic operation must be of type 'any', 'number' or an enum type.";
    pub const THE_RIGHT_HAND_SIDE_OF_AN_ARITHMETIC_OPERATION_MUST_BE_OF_TYPE_ANY_NUMBER_OR_AN_ENUM_TYPE: &str =
        "The right-hand side of an arithmetic operation must be of type 'any', 'number' or an enum type.";
    pub const THE_LEFT_HAND_SIDE_OF_AN_ASSIGNMENT_EXPRESSION_MUST_BE_A_VARIABLE_OR_A_PROPERTY_ACCESS: &str =
        "The left-hand side of an assignment expression must be a variable or a property access.";
    pub const OPERATOR_CANNOT_BE_APPLIED_TO_TYPES: &str =
        "Operator '{0}' cannot be applied to types '{1}' and '{2}'.";
    pub const A_REST_PARAMETER_MUST_BE_OF_AN_ARRAY_TYPE: &str =
        "A rest parameter must be of an array type.";
    pub const CONSTRUCTORS_FOR_DERIVED_CLASSES_MUST_CONTAIN_A_SUPER_CALL: &str =
        "Constructors for derived classes must contain a 'super' call.";
    pub const FUNCTION_IMPLEMENTATION_IS_MISSING_OR_NOT_IMMEDIATELY_FOLLOWING_THE_DECLARATION: &str =
        "Function implementation is missing or not immediately following the declaration.";
    pub const OVERLOAD_SIGNATURE_IS_NOT_COMPATIBLE_WITH_FUNCTION_IMPLEMENTATION: &str =
        "Overload signature is not compatible with function implementation.";
    pub const SUBSEQUENT_VARIABLE_DECLARATIONS_MUST_HAVE_THE_SAME_TYPE: &str =
        "Subsequent variable declarations must have the same type.  Variable '{0}' must be of type '{1}', but here has type '{2}'.";
    pub const PROPERTY_OF_TYPE_IS_NOT_ASSIGNABLE_TO_STRING_INDEX_TYPE: &str =
        "Property '{0}' of type '{1}' is not assignable to string index type '{2}'.";
    pub const NUMERIC_INDEX_TYPE_IS_NOT_ASSIGNABLE_TO_STRING_INDEX_TYPE: &str =
        "Numeric index type '{0}' is not assignable to string index type '{1}'.";
    pub const CLASS_INCORRECTLY_EXTENDS_BASE_CLASS: &str =
        "Class '{0}' incorrectly extends base class '{1}'.";
    pub const CLASS_INCORRECTLY_IMPLEMENTS_INTERFACE: &str =
        "Class '{0}' incorrectly implements interface '{1}'.";
    pub const A_CLASS_MAY_ONLY_IMPLEMENT_ANOTHER_CLASS_OR_INTERFACE: &str =
        "A class may only implement another class or interface.";
    pub const INTERFACE_INCORRECTLY_EXTENDS_INTERFACE: &str =
        "Interface '{0}' incorrectly extends interface '{1}'.";
    pub const TYPE_ALIAS_CIRCULARLY_REFERENCES_ITSELF: &str =
        "Type alias '{0}' circularly references itself.";
    pub const EXPECTED_TYPE_ARGUMENTS_BUT_GOT: &str =
        "Expected {0} type arguments, but got {1}.";
    pub const VARIABLE_IMPLICITLY_HAS_AN_TYPE: &str =
        "Variable '{0}' implicitly has an '{1}' type.";
    pub const PARAMETER_IMPLICITLY_HAS_AN_TYPE: &str =
        "Parameter '{0}' implicitly has an '{1}' type.";
    pub const MEMBER_IMPLICITLY_HAS_AN_TYPE: &str =
        "Member '{0}' implicitly has an '{1}' type.";
    pub const WHICH_LACKS_RETURN_TYPE_ANNOTATION_IMPLICITLY_HAS_AN_RETURN_TYPE: &str =
        "'{0}', which lacks return-type annotation, implicitly has an '{1}' return type.";
    pub const ARRAY_LITERAL_IMPLICITLY_HAS_AN_ANY_TYPE_FROM_WIDENING: &str =
        "Array literal implicitly has an 'any' type from widening.";
    pub const WAS_ALSO_DECLARED_HERE: &str =
        "'{0}' was also declared here.";

    /// Elaboration lines for type comparison failures.
    pub mod message_chain {
        pub const TYPE_REQUIRES_A_CALL_SIGNATURE_BUT_TYPE_LACKS_ONE: &str =
            "Type '{0}' requires a call signature, but type '{1}' lacks one.";
        pub const TYPE_REQUIRES_A_CONSTRUCT_SIGNATURE_BUT_TYPE_LACKS_ONE: &str =
            "Type '{0}' requires a construct signature, but type '{1}' lacks one.";
        pub const TYPE_REQUIRES_A_STRING_INDEX_SIGNATURE_BUT_TYPE_LACKS_ONE: &str =
            "Type '{0}' requires a string index signature, but type '{1}' lacks one.";
        pub const TYPE_REQUIRES_A_NUMBER_INDEX_SIGNATURE_BUT_TYPE_LACKS_ONE: &str =
            "Type '{0}' requires a numeric index signature, but type '{1}' lacks one.";
        pub const CALL_SIGNATURES_OF_TYPES_ARE_INCOMPATIBLE: &str =
            "Call signatures of types '{0}' and '{1}' are incompatible.";
        pub const CONSTRUCT_SIGNATURES_OF_TYPES_ARE_INCOMPATIBLE: &str =
            "Construct signatures of types '{0}' and '{1}' are incompatible.";
        pub const INDEX_SIGNATURES_OF_TYPES_ARE_INCOMPATIBLE: &str =
            "Index signatures of types '{0}' and '{1}' are incompatible.";
        pub const CALL_SIGNATURE_EXPECTS_OR_FEWER_PARAMETERS: &str =
            "Call signature expects {0} or fewer parameters.";
        pub const TYPES_OF_PARAMETERS_ARE_INCOMPATIBLE: &str =
            "Types of parameters '{0}' and '{1}' are incompatible.";
        pub const RETURN_TYPES_ARE_INCOMPATIBLE: &str =
            "Return type '{0}' is not assignable to '{1}'.";
        pub const PROPERTY_DEFINED_AS_PRIVATE_IN_TYPE_IS_DEFINED_AS_PUBLIC_IN_TYPE: &str =
            "Property '{0}' defined as private in type '{1}' is defined as public in type '{2}'.";
        pub const TYPES_HAVE_SEPARATE_DECLARATIONS_OF_A_PRIVATE_PROPERTY: &str =
            "Types have separate declarations of a private property '{0}'.";
        pub const TYPES_OF_PROPERTY_OF_TYPES_ARE_INCOMPATIBLE: &str =
            "Types of property '{0}' of types '{1}' and '{2}' are incompatible.";
    }
}

pub static DIAGNOSTIC_MESSAGES: &[DiagnosticMessage] = &[
    DiagnosticMessage {
        code: diagnostic_codes::DUPLICATE_IDENTIFIER,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::DUPLICATE_IDENTIFIER,
    },
    DiagnosticMessage {
        code: diagnostic_codes::CANNOT_FIND_NAME,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::CANNOT_FIND_NAME,
    },
    DiagnosticMessage {
        code: diagnostic_codes::MODULE_HAS_NO_EXPORTED_MEMBER,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::MODULE_HAS_NO_EXPORTED_MEMBER,
    },
    DiagnosticMessage {
        code: diagnostic_codes::TYPE_RECURSIVELY_REFERENCES_ITSELF_AS_A_BASE_TYPE,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::TYPE_RECURSIVELY_REFERENCES_ITSELF_AS_A_BASE_TYPE,
    },
    DiagnosticMessage {
        code: diagnostic_codes::A_CLASS_MAY_ONLY_EXTEND_ANOTHER_CLASS,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::A_CLASS_MAY_ONLY_EXTEND_ANOTHER_CLASS,
    },
    DiagnosticMessage {
        code: diagnostic_codes::AN_INTERFACE_MAY_ONLY_EXTEND_A_CLASS_OR_ANOTHER_INTERFACE,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::AN_INTERFACE_MAY_ONLY_EXTEND_A_CLASS_OR_ANOTHER_INTERFACE,
    },
    DiagnosticMessage {
        code: diagnostic_codes::GENERIC_TYPE_REQUIRES_TYPE_ARGUMENTS,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::GENERIC_TYPE_REQUIRES_TYPE_ARGUMENTS,
    },
    DiagnosticMessage {
        code: diagnostic_codes::TYPE_IS_NOT_GENERIC,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::TYPE_IS_NOT_GENERIC,
    },
    DiagnosticMessage {
        code: diagnostic_codes::TYPE_IS_NOT_ASSIGNABLE_TO_TYPE,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::TYPE_IS_NOT_ASSIGNABLE_TO_TYPE,
    },
    DiagnosticMessage {
        code: diagnostic_codes::PROPERTY_IS_MISSING_IN_TYPE,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::PROPERTY_IS_MISSING_IN_TYPE,
    },
    DiagnosticMessage {
        code: diagnostic_codes::TYPES_OF_PROPERTY_ARE_INCOMPATIBLE,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::TYPES_OF_PROPERTY_ARE_INCOMPATIBLE,
    },
    DiagnosticMessage {
        code: diagnostic_codes::THIS_CANNOT_BE_REFERENCED_IN_CURRENT_LOCATION,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::THIS_CANNOT_BE_REFERENCED_IN_CURRENT_LOCATION,
    },
    DiagnosticMessage {
        code: diagnostic_codes::SUPER_CAN_ONLY_BE_REFERENCED_IN_A_DERIVED_CLASS,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::SUPER_CAN_ONLY_BE_REFERENCED_IN_A_DERIVED_CLASS,
    },
    DiagnosticMessage {
        code: diagnostic_codes::SUPER_CALLS_ARE_NOT_PERMITTED_OUTSIDE_CONSTRUCTORS,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::SUPER_CALLS_ARE_NOT_PERMITTED_OUTSIDE_CONSTRUCTORS,
    },
    DiagnosticMessage {
        code: diagnostic_codes::PROPERTY_DOES_NOT_EXIST_ON_TYPE,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::PROPERTY_DOES_NOT_EXIST_ON_TYPE,
    },
    DiagnosticMessage {
        code: diagnostic_codes::PROPERTY_IS_PRIVATE_AND_ONLY_ACCESSIBLE_WITHIN_CLASS,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::PROPERTY_IS_PRIVATE_AND_ONLY_ACCESSIBLE_WITHIN_CLASS,
    },
    DiagnosticMessage {
        code: diagnostic_codes::AN_INDEX_EXPRESSION_ARGUMENT_MUST_BE_OF_TYPE_STRING_NUMBER_OR_ANY,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::AN_INDEX_EXPRESSION_ARGUMENT_MUST_BE_OF_TYPE_STRING_NUMBER_OR_ANY,
    },
    DiagnosticMessage {
        code: diagnostic_codes::TYPE_DOES_NOT_SATISFY_THE_CONSTRAINT,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::TYPE_DOES_NOT_SATISFY_THE_CONSTRAINT,
    },
    DiagnosticMessage {
        code: diagnostic_codes::ARGUMENT_OF_TYPE_IS_NOT_ASSIGNABLE_TO_PARAMETER_OF_TYPE,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::ARGUMENT_OF_TYPE_IS_NOT_ASSIGNABLE_TO_PARAMETER_OF_TYPE,
    },
    DiagnosticMessage {
        code: diagnostic_codes::SUPPLIED_PARAMETERS_DO_NOT_MATCH_ANY_SIGNATURE_OF_CALL_TARGET,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::SUPPLIED_PARAMETERS_DO_NOT_MATCH_ANY_SIGNATURE_OF_CALL_TARGET,
    },
    DiagnosticMessage {
        code: diagnostic_codes::UNTYPED_FUNCTION_CALLS_MAY_NOT_ACCEPT_TYPE_ARGUMENTS,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::UNTYPED_FUNCTION_CALLS_MAY_NOT_ACCEPT_TYPE_ARGUMENTS,
    },
    DiagnosticMessage {
        code: diagnostic_codes::VALUE_OF_TYPE_IS_NOT_CALLABLE_DID_YOU_MEAN_TO_INCLUDE_NEW,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::VALUE_OF_TYPE_IS_NOT_CALLABLE_DID_YOU_MEAN_TO_INCLUDE_NEW,
    },
    DiagnosticMessage {
        code: diagnostic_codes::CANNOT_INVOKE_AN_EXPRESSION_WHOSE_TYPE_LACKS_A_CALL_SIGNATURE,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::CANNOT_INVOKE_AN_EXPRESSION_WHOSE_TYPE_LACKS_A_CALL_SIGNATURE,
    },
    DiagnosticMessage {
        code: diagnostic_codes::CANNOT_USE_NEW_WITH_AN_EXPRESSION_WHOSE_TYPE_LACKS_A_CONSTRUCT_SIGNATURE,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::CANNOT_USE_NEW_WITH_AN_EXPRESSION_WHOSE_TYPE_LACKS_A_CONSTRUCT_SIGNATURE,
    },
    DiagnosticMessage {
        code: diagnostic_codes::NEITHER_TYPE_IS_ASSIGNABLE_TO_THE_OTHER,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::NEITHER_TYPE_IS_ASSIGNABLE_TO_THE_OTHER,
    },
    DiagnosticMessage {
        code: diagnostic_codes::A_FUNCTION_WHOSE_DECLARED_TYPE_IS_NEITHER_VOID_NOR_ANY_MUST_RETURN_A_VALUE,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::A_FUNCTION_WHOSE_DECLARED_TYPE_IS_NEITHER_VOID_NOR_ANY_MUST_RETURN_A_VALUE,
    },
    DiagnosticMessage {
        code: diagnostic_codes::AN_ARITHMETIC_OPERAND_MUST_BE_OF_TYPE_ANY_NUMBER_OR_AN_ENUM_TYPE,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::AN_ARITHMETIC_OPERAND_MUST_BE_OF_TYPE_ANY_NUMBER_OR_AN_ENUM_TYPE,
    },
    DiagnosticMessage {
        code: diagnostic_codes::THE_OPERAND_OF_AN_INCREMENT_OR_DECREMENT_OPERATOR_MUST_BE_A_VARIABLE_OR_PROPERTY,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::THE_OPERAND_OF_AN_INCREMENT_OR_DECREMENT_OPERATOR_MUST_BE_A_VARIABLE_OR_PROPERTY,
    },
    DiagnosticMessage {
        code: diagnostic_codes::THE_LEFT_HAND_SIDE_OF_AN_INSTANCEOF_EXPRESSION_MUST_BE_OF_TYPE_ANY_OR_AN_OBJECT_TYPE,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::THE_LEFT_HAND_SIDE_OF_AN_INSTANCEOF_EXPRESSION_MUST_BE_OF_TYPE_ANY_OR_AN_OBJECT_TYPE,
    },
    DiagnosticMessage {
        code: diagnostic_codes::THE_LEFT_HAND_SIDE_OF_AN_ARITHMETIC_OPERATION_MUST_BE_OF_TYPE_ANY_NUMBER_OR_AN_ENUM_TYPE,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::THE_LEFT_HAND_SIDE_OF_AN_ARITHMETIC_OPERATION_MUST_BE_OF_TYPE_ANY_NUMBER_OR_AN_ENUM_TYPE,
    },
    DiagnosticMessage {
        code: diagnostic_codes::THE_RIGHT_HAND_SIDE_OF_AN_ARITHMETIC_OPERATION_MUST_BE_OF_TYPE_ANY_NUMBER_OR_AN_ENUM_TYPE,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::THE_RIGHT_HAND_SIDE_OF_AN_ARITHMETIC_OPERATION_MUST_BE_OF_TYPE_ANY_NUMBER_OR_AN_ENUM_TYPE,
    },
    DiagnosticMessage {
        code: diagnostic_codes::THE_LEFT_HAND_SIDE_OF_AN_ASSIGNMENT_EXPRESSION_MUST_BE_A_VARIABLE_OR_A_PROPERTY_ACCESS,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::THE_LEFT_HAND_SIDE_OF_AN_ASSIGNMENT_EXPRESSION_MUST_BE_A_VARIABLE_OR_A_PROPERTY_ACCESS,
    },
    DiagnosticMessage {
        code: diagnostic_codes::OPERATOR_CANNOT_BE_APPLIED_TO_TYPES,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::OPERATOR_CANNOT_BE_APPLIED_TO_TYPES,
    },
    DiagnosticMessage {
        code: diagnostic_codes::A_REST_PARAMETER_MUST_BE_OF_AN_ARRAY_TYPE,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::A_REST_PARAMETER_MUST_BE_OF_AN_ARRAY_TYPE,
    },
    DiagnosticMessage {
        code: diagnostic_codes::CONSTRUCTORS_FOR_DERIVED_CLASSES_MUST_CONTAIN_A_SUPER_CALL,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::CONSTRUCTORS_FOR_DERIVED_CLASSES_MUST_CONTAIN_A_SUPER_CALL,
    },
    DiagnosticMessage {
        code: diagnostic_codes::FUNCTION_IMPLEMENTATION_IS_MISSING_OR_NOT_IMMEDIATELY_FOLLOWING_THE_DECLARATION,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::FUNCTION_IMPLEMENTATION_IS_MISSING_OR_NOT_IMMEDIATELY_FOLLOWING_THE_DECLARATION,
    },
    DiagnosticMessage {
        code: diagnostic_codes::OVERLOAD_SIGNATURE_IS_NOT_COMPATIBLE_WITH_FUNCTION_IMPLEMENTATION,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::OVERLOAD_SIGNATURE_IS_NOT_COMPATIBLE_WITH_FUNCTION_IMPLEMENTATION,
    },
    DiagnosticMessage {
        code: diagnostic_codes::SUBSEQUENT_VARIABLE_DECLARATIONS_MUST_HAVE_THE_SAME_TYPE,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::SUBSEQUENT_VARIABLE_DECLARATIONS_MUST_HAVE_THE_SAME_TYPE,
    },
    DiagnosticMessage {
        code: diagnostic_codes::PROPERTY_OF_TYPE_IS_NOT_ASSIGNABLE_TO_STRING_INDEX_TYPE,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::PROPERTY_OF_TYPE_IS_NOT_ASSIGNABLE_TO_STRING_INDEX_TYPE,
    },
    DiagnosticMessage {
        code: diagnostic_codes::NUMERIC_INDEX_TYPE_IS_NOT_ASSIGNABLE_TO_STRING_INDEX_TYPE,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::NUMERIC_INDEX_TYPE_IS_NOT_ASSIGNABLE_TO_STRING_INDEX_TYPE,
    },
    DiagnosticMessage {
        code: diagnostic_codes::CLASS_INCORRECTLY_EXTENDS_BASE_CLASS,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::CLASS_INCORRECTLY_EXTENDS_BASE_CLASS,
    },
    DiagnosticMessage {
        code: diagnostic_codes::CLASS_INCORRECTLY_IMPLEMENTS_INTERFACE,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::CLASS_INCORRECTLY_IMPLEMENTS_INTERFACE,
    },
    DiagnosticMessage {
        code: diagnostic_codes::A_CLASS_MAY_ONLY_IMPLEMENT_ANOTHER_CLASS_OR_INTERFACE,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::A_CLASS_MAY_ONLY_IMPLEMENT_ANOTHER_CLASS_OR_INTERFACE,
    },
    DiagnosticMessage {
        code: diagnostic_codes::INTERFACE_INCORRECTLY_EXTENDS_INTERFACE,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::INTERFACE_INCORRECTLY_EXTENDS_INTERFACE,
    },
    DiagnosticMessage {
        code: diagnostic_codes::TYPE_ALIAS_CIRCULARLY_REFERENCES_ITSELF,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::TYPE_ALIAS_CIRCULARLY_REFERENCES_ITSELF,
    },
    DiagnosticMessage {
        code: diagnostic_codes::EXPECTED_TYPE_ARGUMENTS_BUT_GOT,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::EXPECTED_TYPE_ARGUMENTS_BUT_GOT,
    },
    DiagnosticMessage {
        code: diagnostic_codes::VARIABLE_IMPLICITLY_HAS_AN_TYPE,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::VARIABLE_IMPLICITLY_HAS_AN_TYPE,
    },
    DiagnosticMessage {
        code: diagnostic_codes::PARAMETER_IMPLICITLY_HAS_AN_TYPE,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::PARAMETER_IMPLICITLY_HAS_AN_TYPE,
    },
    DiagnosticMessage {
        code: diagnostic_codes::MEMBER_IMPLICITLY_HAS_AN_TYPE,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::MEMBER_IMPLICITLY_HAS_AN_TYPE,
    },
    DiagnosticMessage {
        code: diagnostic_codes::WHICH_LACKS_RETURN_TYPE_ANNOTATION_IMPLICITLY_HAS_AN_RETURN_TYPE,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::WHICH_LACKS_RETURN_TYPE_ANNOTATION_IMPLICITLY_HAS_AN_RETURN_TYPE,
    },
    DiagnosticMessage {
        code: diagnostic_codes::ARRAY_LITERAL_IMPLICITLY_HAS_AN_ANY_TYPE_FROM_WIDENING,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::ARRAY_LITERAL_IMPLICITLY_HAS_AN_ANY_TYPE_FROM_WIDENING,
    },
    DiagnosticMessage {
        code: diagnostic_codes::WAS_ALSO_DECLARED_HERE,
        category: DiagnosticCategory::Message,
        message: diagnostic_messages::WAS_ALSO_DECLARED_HERE,
    },
];
