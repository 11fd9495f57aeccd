// Test modules for QuickChat
// Each module contains the unit tests for the corresponding source module

mod storage_tests;
